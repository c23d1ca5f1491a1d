use rstar::{Envelope, AABB};
use smartlegend_common::color::{first_usable_color, TRANSPARENT};
use smartlegend_common::types::StrokeJoin;
use smartlegend_scenegraph::geometry::MarkGeometryUtils;
use smartlegend_scenegraph::marks::line::SceneLineMark;
use smartlegend_scenegraph::marks::mark::SceneMark;
use smartlegend_scenegraph::marks::rect::SceneRectMark;
use smartlegend_scenegraph::marks::symbol::SceneSymbolMark;

use crate::config::LegendConfig;
use crate::series::{SeriesKind, SeriesStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphConfig {
    /// Length of the line drawn for line series
    pub line_length: f32,
    /// Side of the box drawn for filled series
    pub box_size: f32,
    pub zindex: i32,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            line_length: 16.0,
            box_size: 12.0,
            zindex: 0,
        }
    }
}

impl From<&LegendConfig> for GlyphConfig {
    fn from(config: &LegendConfig) -> Self {
        Self {
            line_length: config.line_length,
            box_size: config.filled_box_size,
            zindex: config.zindex + 1,
        }
    }
}

/// Drawable description of the glyph shown left of a legend label
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphSpec {
    Line {
        line: SceneLineMark,
        marker: Option<SceneSymbolMark>,
    },
    Scatter {
        marker: SceneSymbolMark,
    },
    Filled {
        rect: SceneRectMark,
    },
}

impl GlyphSpec {
    /// Marks in the order they should be added to the surface
    pub fn marks(&self) -> Vec<SceneMark> {
        match self {
            GlyphSpec::Line { line, marker } => std::iter::once(line.clone().into())
                .chain(marker.clone().map(SceneMark::from))
                .collect(),
            GlyphSpec::Scatter { marker } => vec![marker.clone().into()],
            GlyphSpec::Filled { rect } => vec![rect.clone().into()],
        }
    }

    /// Bounding box of the glyph before it is moved into place
    pub fn local_bounding_box(&self) -> AABB<[f32; 2]> {
        let mut marks = self.marks().into_iter();
        let Some(first) = marks.next() else {
            return AABB::from_point([0.0, 0.0]);
        };
        marks.fold(first.bounding_box(), |acc, mark| {
            acc.merged(&mark.bounding_box())
        })
    }
}

/// Describes the legend glyph for a series field.
///
/// Colors that are unset or fully transparent fall back to the field's
/// legend color and then to black, so this never fails.
pub fn describe_glyph(
    kind: SeriesKind,
    style: &SeriesStyle,
    legend_color: Option<[f32; 4]>,
    config: &GlyphConfig,
) -> GlyphSpec {
    match kind {
        SeriesKind::Line => {
            let line = SceneLineMark {
                name: "legend_line".to_string(),
                stroke: first_usable_color([style.stroke.as_ref(), legend_color.as_ref()]),
                stroke_width: style.stroke_width,
                stroke_dash: style.stroke_dash.clone(),
                stroke_join: StrokeJoin::Round,
                zindex: Some(config.zindex),
                ..SceneLineMark::segment(0.5, 0.5, config.line_length + 0.5, 0.5)
            };
            let marker = style
                .show_markers
                .then(|| describe_marker(style, legend_color, config));
            GlyphSpec::Line { line, marker }
        }
        SeriesKind::Scatter => GlyphSpec::Scatter {
            marker: describe_marker(style, legend_color, config),
        },
        SeriesKind::Filled => GlyphSpec::Filled {
            rect: SceneRectMark {
                name: "legend_box".to_string(),
                width: config.box_size,
                height: config.box_size,
                fill: first_usable_color([legend_color.as_ref()]),
                zindex: Some(config.zindex),
                ..Default::default()
            },
        },
    }
}

fn describe_marker(
    style: &SeriesStyle,
    legend_color: Option<[f32; 4]>,
    config: &GlyphConfig,
) -> SceneSymbolMark {
    let marker = &style.marker;
    SceneSymbolMark {
        name: "legend_marker".to_string(),
        shape: marker.shape,
        x: config.line_length / 2.0 + 0.5,
        y: 0.5,
        radius: marker.radius,
        fill: first_usable_color([marker.fill.as_ref(), legend_color.as_ref()]),
        stroke: marker.stroke.unwrap_or(TRANSPARENT),
        stroke_width: marker.stroke_width,
        zindex: Some(config.zindex + 1),
        ..Default::default()
    }
}
