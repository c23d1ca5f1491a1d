use unicode_segmentation::UnicodeSegmentation;

use super::{TextBounds, TextMeasurementConfig, TextMeasurer};

/// Font-independent measurer that estimates glyph advances from the font size.
///
/// Results are deterministic across platforms, which keeps legend layouts
/// reproducible in headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMeasurer {
    /// Average advance of one grapheme, as a fraction of the font size
    pub char_width: f32,
    /// Extra advance applied to bold text
    pub bold_factor: f32,
    /// Line box height, as a multiple of the font size
    pub line_height: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self {
            char_width: 0.6,
            bold_factor: 1.1,
            line_height: 1.2,
        }
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure_text_bounds(&self, config: &TextMeasurementConfig) -> TextBounds {
        let font_size = config.font.size;
        let mut bounds = TextBounds::empty(font_size);
        bounds.line_height = font_size * self.line_height;

        let graphemes = config.text.graphemes(true).count() as f32;
        let mut width = graphemes * font_size * self.char_width;
        if config.font.is_bold() {
            width *= self.bold_factor;
        }
        bounds.width = width;
        bounds
    }
}
