#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartlegend_text::types::FontWeight;

use crate::error::SmartLegendSceneGraphError;

/// A partial update to a glyph. Fields left as `None` keep their current value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphAttributes {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub translate: Option<[f32; 2]>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub opacity: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub hidden: Option<bool>,
}

impl GlyphAttributes {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            translate: Some([x, y]),
            ..Default::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Default::default()
        }
    }

    pub fn hidden(hidden: bool) -> Self {
        Self {
            hidden: Some(hidden),
            ..Default::default()
        }
    }

    pub fn font_weight(weight: FontWeight) -> Self {
        Self {
            font_weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), SmartLegendSceneGraphError> {
        let checks = [
            ("x", self.x),
            ("y", self.y),
            ("translate", self.translate.map(|t| t[0] + t[1])),
            ("width", self.width),
            ("height", self.height),
            ("opacity", self.opacity),
        ];
        for (name, value) in checks {
            if matches!(value, Some(v) if !v.is_finite()) {
                return Err(SmartLegendSceneGraphError::NonFiniteAttribute(name));
            }
        }
        Ok(())
    }
}
