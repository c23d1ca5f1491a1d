use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::{BLACK, TRANSPARENT};
use smartlegend_common::types::SymbolShape;

use super::hash_f32s;
use super::mark::SceneMark;

/// A single point marker centered on `(x, y) + translate`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSymbolMark {
    pub name: String,
    pub shape: SymbolShape,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub fill: [f32; 4],
    pub stroke: [f32; 4],
    pub stroke_width: Option<f32>,
    pub translate: [f32; 2],
    pub opacity: f32,
    pub hidden: bool,
    pub zindex: Option<i32>,
}

impl SceneSymbolMark {
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.translate[0], self.y + self.translate[1]]
    }
}

impl Hash for SceneSymbolMark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.shape.hash(state);
        hash_f32s(
            &[
                self.x,
                self.y,
                self.radius,
                self.stroke_width.unwrap_or(0.0),
                self.opacity,
            ],
            state,
        );
        hash_f32s(&self.fill, state);
        hash_f32s(&self.stroke, state);
        hash_f32s(&self.translate, state);
        self.hidden.hash(state);
        self.zindex.hash(state);
    }
}

impl Default for SceneSymbolMark {
    fn default() -> Self {
        Self {
            name: "symbol_mark".to_string(),
            shape: SymbolShape::default(),
            x: 0.0,
            y: 0.0,
            radius: 2.0,
            fill: BLACK,
            stroke: TRANSPARENT,
            stroke_width: None,
            translate: [0.0, 0.0],
            opacity: 1.0,
            hidden: false,
            zindex: None,
        }
    }
}

impl From<SceneSymbolMark> for SceneMark {
    fn from(mark: SceneSymbolMark) -> Self {
        SceneMark::Symbol(mark)
    }
}
