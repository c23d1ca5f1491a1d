#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::{parse_color, BLACK, WHITE};
use smartlegend_text::font::FontSpec;
use strum::VariantNames;

use crate::error::SmartLegendError;

/// Where the legend sits relative to the chart surface
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Default, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum LegendPosition {
    Left,
    Right,
    Top,
    #[default]
    Bottom,
    /// Top-left corner of the legend box, measured from the inset origin
    Explicit { x: f32, y: f32 },
}

impl LegendPosition {
    /// Side placements stack entries in columns, edge placements in rows.
    /// Explicit placements float and stack vertically.
    pub fn default_orientation(&self) -> LegendOrientation {
        match self {
            LegendPosition::Top | LegendPosition::Bottom => LegendOrientation::Horizontal,
            LegendPosition::Left | LegendPosition::Right | LegendPosition::Explicit { .. } => {
                LegendOrientation::Vertical
            }
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum LegendOrientation {
    Vertical,
    Horizontal,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct LegendConfig {
    pub position: LegendPosition,

    /// Overrides the orientation implied by `position`
    pub orientation: Option<LegendOrientation>,

    /// Space between the legend frame and its entries, and between an
    /// entry's glyph and its label
    pub padding: f32,

    /// Space between neighboring entries. Halved for vertical legends.
    pub item_spacing: f32,

    pub label_font: FontSpec,
    pub label_color: [f32; 4],

    pub box_fill: [f32; 4],
    pub box_stroke: [f32; 4],
    pub box_stroke_width: f32,

    /// Length of the line glyph drawn for line series
    pub line_length: f32,

    /// Nominal side of the filled box glyph before it is resized to the
    /// label font height
    pub filled_box_size: f32,

    /// Label opacity of entries whose series field is hidden
    pub hidden_opacity: f32,

    /// Height of an entry's hit mask as a multiple of the label font height
    pub mask_height_factor: f32,

    pub zindex: i32,
    pub visible: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            position: LegendPosition::default(),
            orientation: None,
            padding: 5.0,
            item_spacing: 10.0,
            label_font: FontSpec::default(),
            label_color: BLACK,
            box_fill: WHITE,
            box_stroke: BLACK,
            box_stroke_width: 1.0,
            line_length: 16.0,
            filled_box_size: 12.0,
            hidden_opacity: 0.5,
            mask_height_factor: 2.0,
            zindex: 0,
            visible: true,
        }
    }
}

impl LegendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    pub fn orientation(mut self, orientation: LegendOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn item_spacing(mut self, item_spacing: f32) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn label_font(mut self, font: FontSpec) -> Self {
        self.label_font = font;
        self
    }

    /// Sets the label font from a CSS shorthand such as `"bold 11px Arial"`
    pub fn label_font_css(self, font: &str) -> Result<Self, SmartLegendError> {
        Ok(self.label_font(font.parse()?))
    }

    pub fn label_color_css(mut self, color: &str) -> Result<Self, SmartLegendError> {
        self.label_color = parse_color(color)?;
        Ok(self)
    }

    pub fn box_colors_css(mut self, fill: &str, stroke: &str) -> Result<Self, SmartLegendError> {
        self.box_fill = parse_color(fill)?;
        self.box_stroke = parse_color(stroke)?;
        Ok(self)
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn resolved_orientation(&self) -> LegendOrientation {
        self.orientation
            .unwrap_or_else(|| self.position.default_orientation())
    }

    pub fn is_vertical(&self) -> bool {
        self.resolved_orientation() == LegendOrientation::Vertical
    }

    pub fn validate(&self) -> Result<(), SmartLegendError> {
        let non_negative = [
            ("padding", self.padding),
            ("item_spacing", self.item_spacing),
            ("box_stroke_width", self.box_stroke_width),
            ("line_length", self.line_length),
            ("filled_box_size", self.filled_box_size),
            ("mask_height_factor", self.mask_height_factor),
            ("label_font.size", self.label_font.size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SmartLegendError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.hidden_opacity) {
            return Err(SmartLegendError::InvalidConfig(format!(
                "hidden_opacity must be within [0, 1], got {}",
                self.hidden_opacity
            )));
        }
        if let LegendPosition::Explicit { x, y } = self.position {
            if !x.is_finite() || !y.is_finite() {
                return Err(SmartLegendError::InvalidConfig(
                    "explicit legend position must be finite".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LegendPosition::Left, true)]
    #[case(LegendPosition::Right, true)]
    #[case(LegendPosition::Top, false)]
    #[case(LegendPosition::Bottom, false)]
    #[case(LegendPosition::Explicit { x: 0.0, y: 0.0 }, true)]
    fn test_orientation_follows_position(#[case] position: LegendPosition, #[case] vertical: bool) {
        assert_eq!(LegendConfig::new().position(position).is_vertical(), vertical);
    }

    #[test]
    fn test_orientation_override() {
        let config = LegendConfig::new()
            .position(LegendPosition::Right)
            .orientation(LegendOrientation::Horizontal);
        assert!(!config.is_vertical());
    }

    #[test]
    fn test_validate_rejects_negative_padding() {
        let err = LegendConfig::new().padding(-1.0).validate().unwrap_err();
        assert!(matches!(err, SmartLegendError::InvalidConfig(msg) if msg.contains("padding")));
    }

    #[test]
    fn test_validate_rejects_opacity_out_of_range() {
        let config = LegendConfig {
            hidden_opacity: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(LegendConfig::default().validate().is_ok());
    }

    #[test]
    fn test_css_builders() {
        let config = LegendConfig::new()
            .label_font_css("bold 11px Arial")
            .unwrap()
            .label_color_css("#f00")
            .unwrap();
        assert!(config.label_font.is_bold());
        assert_eq!(config.label_color, [1.0, 0.0, 0.0, 1.0]);

        assert!(matches!(
            LegendConfig::new().label_font_css("Arial"),
            Err(SmartLegendError::InvalidFont(_))
        ));
        assert!(matches!(
            LegendConfig::new().box_colors_css("#fff", "nope"),
            Err(SmartLegendError::InvalidStyle(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_config() {
        let config: LegendConfig = serde_json::from_str(
            r#"{"position": "right", "padding": 8, "label_font": "bold 10px Verdana"}"#,
        )
        .unwrap();
        assert_eq!(config.position, LegendPosition::Right);
        assert_eq!(config.padding, 8.0);
        assert_eq!(config.item_spacing, 10.0);
        assert!(config.label_font.is_bold());

        let config: LegendConfig =
            serde_json::from_str(r#"{"position": {"explicit": {"x": 10, "y": 20}}}"#).unwrap();
        assert_eq!(config.position, LegendPosition::Explicit { x: 10.0, y: 20.0 });
    }
}
