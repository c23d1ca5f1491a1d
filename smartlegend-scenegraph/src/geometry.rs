use rstar::{Envelope, AABB};
use smartlegend_text::measurement::{default_text_measurer, TextMeasurementConfig, TextMeasurer};

use crate::marks::line::SceneLineMark;
use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;
use crate::marks::symbol::SceneSymbolMark;
use crate::marks::text::SceneTextMark;

pub trait EnvelopeUtils {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

impl EnvelopeUtils for AABB<[f32; 2]> {
    fn x(&self) -> f32 {
        self.lower()[0]
    }

    fn y(&self) -> f32 {
        self.lower()[1]
    }

    fn width(&self) -> f32 {
        self.upper()[0] - self.lower()[0]
    }

    fn height(&self) -> f32 {
        self.upper()[1] - self.lower()[1]
    }
}

/// Bounding boxes of glyphs in surface coordinates, translation included
pub trait MarkGeometryUtils {
    fn bounding_box_with(&self, measurer: &dyn TextMeasurer) -> AABB<[f32; 2]>;

    fn bounding_box(&self) -> AABB<[f32; 2]> {
        self.bounding_box_with(&default_text_measurer())
    }
}

fn expanded(bbox: AABB<[f32; 2]>, by: f32) -> AABB<[f32; 2]> {
    let by = by.max(0.0);
    let lower = bbox.lower();
    let upper = bbox.upper();
    AABB::from_corners([lower[0] - by, lower[1] - by], [upper[0] + by, upper[1] + by])
}

impl MarkGeometryUtils for SceneLineMark {
    fn bounding_box_with(&self, _measurer: &dyn TextMeasurer) -> AABB<[f32; 2]> {
        let mut points = self.points();
        let Some(first) = points.next() else {
            return AABB::from_point(self.translate);
        };
        let bbox = points.fold(AABB::from_point(first), |acc, p| {
            acc.merged(&AABB::from_point(p))
        });
        expanded(bbox, self.stroke_width / 2.0)
    }
}

impl MarkGeometryUtils for SceneSymbolMark {
    fn bounding_box_with(&self, _measurer: &dyn TextMeasurer) -> AABB<[f32; 2]> {
        let [cx, cy] = self.center();
        let [hx, hy] = self.shape.half_extents(self.radius);
        let bbox = AABB::from_corners([cx - hx, cy - hy], [cx + hx, cy + hy]);
        expanded(bbox, self.stroke_width.unwrap_or(0.0) / 2.0)
    }
}

impl MarkGeometryUtils for SceneRectMark {
    fn bounding_box_with(&self, _measurer: &dyn TextMeasurer) -> AABB<[f32; 2]> {
        let (lower, upper) = self.corners();
        expanded(AABB::from_corners(lower, upper), self.stroke_width / 2.0)
    }
}

impl MarkGeometryUtils for SceneTextMark {
    fn bounding_box_with(&self, measurer: &dyn TextMeasurer) -> AABB<[f32; 2]> {
        let bounds = measurer.measure_text_bounds(&TextMeasurementConfig {
            text: &self.text,
            font: &self.font,
        });
        let position = [self.x + self.translate[0], self.y + self.translate[1]];
        let origin = bounds.calculate_origin(position, &self.align, &self.baseline);
        AABB::from_corners(
            origin,
            [origin[0] + bounds.width, origin[1] + bounds.line_height],
        )
    }
}

impl MarkGeometryUtils for SceneMark {
    fn bounding_box_with(&self, measurer: &dyn TextMeasurer) -> AABB<[f32; 2]> {
        match self {
            SceneMark::Line(mark) => mark.bounding_box_with(measurer),
            SceneMark::Symbol(mark) => mark.bounding_box_with(measurer),
            SceneMark::Rect(mark) => mark.bounding_box_with(measurer),
            SceneMark::Text(mark) => mark.bounding_box_with(measurer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use smartlegend_text::font::FontSpec;

    #[test]
    fn test_line_bbox_includes_half_stroke() {
        let mark = SceneLineMark {
            stroke_width: 2.0,
            translate: [10.0, 20.0],
            ..SceneLineMark::segment(0.5, 0.5, 16.5, 0.5)
        };
        let bbox = mark.bounding_box();
        assert_approx_eq!(f32, bbox.x(), 9.5);
        assert_approx_eq!(f32, bbox.y(), 19.5);
        assert_approx_eq!(f32, bbox.width(), 18.0);
        assert_approx_eq!(f32, bbox.height(), 2.0);
    }

    #[test]
    fn test_empty_line_bbox_is_translate_point() {
        let mark = SceneLineMark {
            translate: [3.0, 4.0],
            ..Default::default()
        };
        let bbox = mark.bounding_box();
        assert_eq!(bbox.lower(), [3.0, 4.0]);
        assert_eq!(bbox.width(), 0.0);
    }

    #[test]
    fn test_symbol_bbox() {
        let mark = SceneSymbolMark {
            x: 8.5,
            y: 0.5,
            radius: 3.0,
            ..Default::default()
        };
        let bbox = mark.bounding_box();
        assert_approx_eq!(f32, bbox.x(), 5.5);
        assert_approx_eq!(f32, bbox.y(), -2.5);
        assert_approx_eq!(f32, bbox.width(), 6.0);
    }

    #[test]
    fn test_negative_rect_is_normalized() {
        let mark = SceneRectMark {
            x: 10.0,
            y: 10.0,
            width: -4.0,
            height: -6.0,
            ..Default::default()
        };
        let bbox = mark.bounding_box();
        assert_eq!(bbox.lower(), [6.0, 4.0]);
        assert_eq!(bbox.upper(), [10.0, 10.0]);
    }

    #[test]
    fn test_text_bbox_middle_baseline() {
        let mark = SceneTextMark {
            text: "abcde".to_string(),
            x: 20.0,
            y: 50.0,
            font: FontSpec {
                size: 10.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let bbox = mark.bounding_box();
        assert_approx_eq!(f32, bbox.x(), 20.0);
        assert_approx_eq!(f32, bbox.y(), 44.0);
        assert_approx_eq!(f32, bbox.width(), 30.0);
        assert_approx_eq!(f32, bbox.height(), 12.0);
    }
}
