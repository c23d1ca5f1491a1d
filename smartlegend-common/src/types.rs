#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::error::CommonError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum StrokeJoin {
    Bevel,
    #[default]
    Miter,
    Round,
}

/// Marker shapes a point series can draw with.
///
/// Shapes are centered on their anchor and fit inside the circle described
/// by the marker radius.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum SymbolShape {
    #[default]
    Circle,
    Square,
    Cross,
    Diamond,
    TriangleUp,
    TriangleDown,
}

impl SymbolShape {
    pub fn from_name(shape: &str) -> Result<SymbolShape, CommonError> {
        Ok(match shape.trim().to_ascii_lowercase().as_str() {
            "circle" => SymbolShape::Circle,
            "square" | "rect" => SymbolShape::Square,
            "cross" | "plus" => SymbolShape::Cross,
            "diamond" => SymbolShape::Diamond,
            "triangle" | "triangle-up" => SymbolShape::TriangleUp,
            "triangle-down" => SymbolShape::TriangleDown,
            _ => return Err(CommonError::UnknownSymbolShape(shape.to_string())),
        })
    }

    /// Half extents of the shape's bounding box for a given radius
    pub fn half_extents(&self, radius: f32) -> [f32; 2] {
        let radius = radius.max(0.0);
        match self {
            SymbolShape::Circle
            | SymbolShape::Square
            | SymbolShape::Cross
            | SymbolShape::Diamond => [radius, radius],
            // Equilateral triangle inscribed in the marker circle
            SymbolShape::TriangleUp | SymbolShape::TriangleDown => {
                [radius * 3.0f32.sqrt() / 2.0, radius]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("circle", SymbolShape::Circle)]
    #[case("Square", SymbolShape::Square)]
    #[case(" plus ", SymbolShape::Cross)]
    #[case("triangle", SymbolShape::TriangleUp)]
    #[case("triangle-down", SymbolShape::TriangleDown)]
    fn test_symbol_shape_from_name(#[case] name: &str, #[case] expected: SymbolShape) {
        assert_eq!(SymbolShape::from_name(name).unwrap(), expected);
    }

    #[test]
    fn test_unknown_symbol_shape() {
        let err = SymbolShape::from_name("hexagon").unwrap_err();
        assert_eq!(err, CommonError::UnknownSymbolShape("hexagon".to_string()));
    }

    #[test]
    fn test_half_extents_clamp_negative_radius() {
        assert_eq!(SymbolShape::Circle.half_extents(-3.0), [0.0, 0.0]);
        assert_eq!(SymbolShape::Square.half_extents(4.0), [4.0, 4.0]);
    }

    #[test]
    fn test_variant_names() {
        assert!(SymbolShape::VARIANTS.contains(&"triangle-up"));
        assert_eq!(StrokeCap::VARIANTS, &["butt", "round", "square"]);
    }
}
