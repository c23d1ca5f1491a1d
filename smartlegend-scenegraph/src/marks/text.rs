use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::BLACK;
use smartlegend_text::font::FontSpec;
use smartlegend_text::types::{TextAlign, TextBaseline};

use super::hash_f32s;
use super::mark::SceneMark;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTextMark {
    pub name: String,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: [f32; 4],
    pub font: FontSpec,
    pub translate: [f32; 2],
    pub opacity: f32,
    pub hidden: bool,
    pub zindex: Option<i32>,
}

impl Hash for SceneTextMark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.text.hash(state);
        hash_f32s(&[self.x, self.y, self.font.size, self.opacity], state);
        self.align.hash(state);
        self.baseline.hash(state);
        hash_f32s(&self.color, state);
        self.font.family.hash(state);
        self.font.weight.hash(state);
        self.font.style.hash(state);
        hash_f32s(&self.translate, state);
        self.hidden.hash(state);
        self.zindex.hash(state);
    }
}

impl Default for SceneTextMark {
    fn default() -> Self {
        Self {
            name: "text_mark".to_string(),
            text: String::new(),
            x: 0.0,
            y: 0.0,
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            color: BLACK,
            font: FontSpec::default(),
            translate: [0.0, 0.0],
            opacity: 1.0,
            hidden: false,
            zindex: None,
        }
    }
}

impl From<SceneTextMark> for SceneMark {
    fn from(mark: SceneTextMark) -> Self {
        SceneMark::Text(mark)
    }
}
