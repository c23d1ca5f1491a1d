#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::attributes::GlyphAttributes;
use crate::error::SmartLegendSceneGraphError;
use crate::marks::line::SceneLineMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::symbol::SceneSymbolMark;
use crate::marks::text::SceneTextMark;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum SceneMark {
    Line(SceneLineMark),
    Symbol(SceneSymbolMark),
    Rect(SceneRectMark),
    Text(SceneTextMark),
}

impl SceneMark {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Line(_) => "line",
            Self::Symbol(_) => "symbol",
            Self::Rect(_) => "rect",
            Self::Text(_) => "text",
        }
    }

    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Line(mark) => mark.zindex,
            Self::Symbol(mark) => mark.zindex,
            Self::Rect(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Self::Line(mark) => mark.hidden,
            Self::Symbol(mark) => mark.hidden,
            Self::Rect(mark) => mark.hidden,
            Self::Text(mark) => mark.hidden,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Self::Line(mark) => mark.opacity,
            Self::Symbol(mark) => mark.opacity,
            Self::Rect(mark) => mark.opacity,
            Self::Text(mark) => mark.opacity,
        }
    }

    pub fn translate(&self) -> [f32; 2] {
        match self {
            Self::Line(mark) => mark.translate,
            Self::Symbol(mark) => mark.translate,
            Self::Rect(mark) => mark.translate,
            Self::Text(mark) => mark.translate,
        }
    }

    /// Applies a partial attribute update.
    ///
    /// The update is validated up front, so a rejected update leaves the
    /// mark untouched.
    pub fn apply(&mut self, attrs: &GlyphAttributes) -> Result<(), SmartLegendSceneGraphError> {
        attrs.validate()?;
        let kind = self.kind_name();
        let unsupported = |attribute: &'static str| SmartLegendSceneGraphError::UnsupportedAttribute {
            mark: kind,
            attribute,
        };

        match self {
            Self::Line(_) if attrs.x.is_some() || attrs.y.is_some() => {
                return Err(unsupported("x/y"));
            }
            Self::Line(_) | Self::Symbol(_) | Self::Text(_)
                if attrs.width.is_some() || attrs.height.is_some() =>
            {
                return Err(unsupported("width/height"));
            }
            Self::Line(_) | Self::Symbol(_) | Self::Rect(_) if attrs.font_weight.is_some() => {
                return Err(unsupported("font_weight"));
            }
            _ => {}
        }

        let (translate, opacity, hidden) = match self {
            Self::Line(mark) => (&mut mark.translate, &mut mark.opacity, &mut mark.hidden),
            Self::Symbol(mark) => {
                set_opt(&mut mark.x, attrs.x);
                set_opt(&mut mark.y, attrs.y);
                (&mut mark.translate, &mut mark.opacity, &mut mark.hidden)
            }
            Self::Rect(mark) => {
                set_opt(&mut mark.x, attrs.x);
                set_opt(&mut mark.y, attrs.y);
                set_opt(&mut mark.width, attrs.width);
                set_opt(&mut mark.height, attrs.height);
                (&mut mark.translate, &mut mark.opacity, &mut mark.hidden)
            }
            Self::Text(mark) => {
                set_opt(&mut mark.x, attrs.x);
                set_opt(&mut mark.y, attrs.y);
                set_opt(&mut mark.font.weight, attrs.font_weight);
                (&mut mark.translate, &mut mark.opacity, &mut mark.hidden)
            }
        };
        set_opt(translate, attrs.translate);
        set_opt(opacity, attrs.opacity.map(|o| o.clamp(0.0, 1.0)));
        set_opt(hidden, attrs.hidden);
        Ok(())
    }
}

fn set_opt<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}
