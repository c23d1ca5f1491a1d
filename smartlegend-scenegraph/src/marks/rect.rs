use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::TRANSPARENT;

use super::hash_f32s;
use super::mark::SceneMark;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneRectMark {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: [f32; 4],
    pub stroke: [f32; 4],
    pub stroke_width: f32,
    pub translate: [f32; 2],
    pub opacity: f32,
    pub hidden: bool,
    pub zindex: Option<i32>,
}

impl SceneRectMark {
    /// Top-left and bottom-right corners after translation, normalized so
    /// that negative sizes still produce an ordered pair
    pub fn corners(&self) -> ([f32; 2], [f32; 2]) {
        let x0 = self.x + self.translate[0];
        let y0 = self.y + self.translate[1];
        let x1 = x0 + self.width;
        let y1 = y0 + self.height;
        ([x0.min(x1), y0.min(y1)], [x0.max(x1), y0.max(y1)])
    }
}

impl Hash for SceneRectMark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        hash_f32s(
            &[self.x, self.y, self.width, self.height, self.stroke_width, self.opacity],
            state,
        );
        hash_f32s(&self.fill, state);
        hash_f32s(&self.stroke, state);
        hash_f32s(&self.translate, state);
        self.hidden.hash(state);
        self.zindex.hash(state);
    }
}

impl Default for SceneRectMark {
    fn default() -> Self {
        Self {
            name: "rect_mark".to_string(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            fill: TRANSPARENT,
            stroke: TRANSPARENT,
            stroke_width: 0.0,
            translate: [0.0, 0.0],
            opacity: 1.0,
            hidden: false,
            zindex: None,
        }
    }
}

impl From<SceneRectMark> for SceneMark {
    fn from(mark: SceneRectMark) -> Self {
        SceneMark::Rect(mark)
    }
}
