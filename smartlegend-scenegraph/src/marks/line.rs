use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_common::color::BLACK;
use smartlegend_common::types::{StrokeCap, StrokeJoin};

use super::hash_f32s;
use super::mark::SceneMark;

/// Polyline through `x[i], y[i]`, offset by `translate`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLineMark {
    pub name: String,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub stroke: [f32; 4],
    pub stroke_width: f32,
    pub stroke_cap: StrokeCap,
    pub stroke_join: StrokeJoin,
    pub stroke_dash: Option<Vec<f32>>,
    pub translate: [f32; 2],
    pub opacity: f32,
    pub hidden: bool,
    pub zindex: Option<i32>,
}

impl SceneLineMark {
    /// Straight segment from `(x0, y0)` to `(x1, y1)`
    pub fn segment(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: vec![x0, x1],
            y: vec![y0, y1],
            ..Default::default()
        }
    }

    pub fn points(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        let [tx, ty] = self.translate;
        self.x
            .iter()
            .zip(self.y.iter())
            .map(move |(x, y)| [x + tx, y + ty])
    }
}

impl Hash for SceneLineMark {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        hash_f32s(&self.x, state);
        hash_f32s(&self.y, state);
        hash_f32s(&self.stroke, state);
        hash_f32s(&[self.stroke_width, self.opacity], state);
        hash_f32s(&self.translate, state);
        self.stroke_cap.hash(state);
        self.stroke_join.hash(state);
        if let Some(stroke_dash) = &self.stroke_dash {
            hash_f32s(stroke_dash, state);
        }
        self.hidden.hash(state);
        self.zindex.hash(state);
    }
}

impl Default for SceneLineMark {
    fn default() -> Self {
        Self {
            name: "line_mark".to_string(),
            x: vec![],
            y: vec![],
            stroke: BLACK,
            stroke_width: 1.0,
            stroke_cap: Default::default(),
            stroke_join: Default::default(),
            stroke_dash: None,
            translate: [0.0, 0.0],
            opacity: 1.0,
            hidden: false,
            zindex: None,
        }
    }
}

impl From<SceneLineMark> for SceneMark {
    fn from(mark: SceneLineMark) -> Self {
        SceneMark::Line(mark)
    }
}
