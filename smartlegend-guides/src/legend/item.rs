use std::rc::Rc;

use rstar::{Envelope, AABB};
use smartlegend_common::color::TRANSPARENT;
use smartlegend_scenegraph::attributes::GlyphAttributes;
use smartlegend_scenegraph::geometry::EnvelopeUtils;
use smartlegend_scenegraph::marks::rect::SceneRectMark;
use smartlegend_scenegraph::marks::text::SceneTextMark;
use smartlegend_scenegraph::surface::{DrawingSurface, GlyphId};
use smartlegend_text::types::{FontWeight, TextBaseline};

use crate::config::LegendConfig;
use crate::legend::glyph::{describe_glyph, GlyphConfig, GlyphSpec};
use crate::series::{SeriesRef, WeakSeriesRef};

/// Mask side used when an entry measures as empty
const FALLBACK_MASK_SIZE: f32 = 20.0;

/// Surface glyphs drawn for an entry's series kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGlyphs {
    Line {
        line: GlyphId,
        marker: Option<GlyphId>,
    },
    Scatter {
        marker: GlyphId,
    },
    Filled {
        rect: GlyphId,
    },
}

impl ItemGlyphs {
    fn add(spec: &GlyphSpec, surface: &mut dyn DrawingSurface) -> Self {
        match spec {
            GlyphSpec::Line { line, marker } => ItemGlyphs::Line {
                line: surface.add_glyph(line.clone().into()),
                marker: marker
                    .as_ref()
                    .map(|marker| surface.add_glyph(marker.clone().into())),
            },
            GlyphSpec::Scatter { marker } => ItemGlyphs::Scatter {
                marker: surface.add_glyph(marker.clone().into()),
            },
            GlyphSpec::Filled { rect } => ItemGlyphs::Filled {
                rect: surface.add_glyph(rect.clone().into()),
            },
        }
    }

    pub fn ids(&self) -> Vec<GlyphId> {
        match *self {
            ItemGlyphs::Line { line, marker } => std::iter::once(line).chain(marker).collect(),
            ItemGlyphs::Scatter { marker } => vec![marker],
            ItemGlyphs::Filled { rect } => vec![rect],
        }
    }
}

/// One legend entry: the glyph, label and invisible hit mask for a single
/// (series, field) pair
#[derive(Debug)]
pub struct LegendItem {
    series: WeakSeriesRef,
    series_id: String,
    field_index: usize,
    label_text: String,
    glyphs: ItemGlyphs,
    /// Right edge of a line or marker glyph. Filled boxes use the font height.
    glyph_right: f32,
    /// Label height measured once at build time
    font_height: f32,
    label: GlyphId,
    mask: GlyphId,
    mask_width: f32,
    mask_offset_x: f32,
    hidden: bool,
    hovered: bool,
    local: [f32; 2],
    padding: f32,
    label_weight: FontWeight,
    hidden_opacity: f32,
    mask_height_factor: f32,
}

impl LegendItem {
    /// Adds the entry's glyphs to `surface` and measures it at the origin.
    ///
    /// Returns `None` when the series is gone or currently borrowed.
    pub fn build(
        series: &SeriesRef,
        field_index: usize,
        config: &LegendConfig,
        surface: &mut dyn DrawingSurface,
    ) -> Option<Self> {
        let (series_id, label_text, spec, hidden) = {
            let s = series.try_borrow().ok()?;
            let spec = describe_glyph(
                s.kind(),
                s.style(),
                s.legend_color(field_index),
                &GlyphConfig::from(config),
            );
            (
                s.id().to_string(),
                s.label(field_index),
                spec,
                !s.is_field_visible(field_index),
            )
        };

        let glyph_zindex = config.zindex + 1;
        let glyph_right = spec.local_bounding_box().upper()[0];
        let glyphs = ItemGlyphs::add(&spec, surface);
        let label = surface.add_glyph(
            SceneTextMark {
                name: "legend_label".to_string(),
                text: label_text.clone(),
                baseline: TextBaseline::Middle,
                color: config.label_color,
                font: config.label_font.clone(),
                opacity: if hidden { config.hidden_opacity } else { 1.0 },
                zindex: Some(glyph_zindex),
                ..Default::default()
            }
            .into(),
        );
        let font_height = surface
            .bounding_box(label)
            .map(|bbox| bbox.height().max(0.0))
            .unwrap_or(0.0);
        let mask = surface.add_glyph(
            SceneRectMark {
                name: "legend_mask".to_string(),
                fill: TRANSPARENT,
                zindex: Some(glyph_zindex + 2),
                ..Default::default()
            }
            .into(),
        );

        let mut item = Self {
            series: Rc::downgrade(series),
            series_id,
            field_index,
            label_text,
            glyphs,
            glyph_right,
            font_height,
            label,
            mask,
            mask_width: FALLBACK_MASK_SIZE,
            mask_offset_x: 0.0,
            hidden,
            hovered: false,
            local: [0.0, 0.0],
            padding: config.padding,
            label_weight: config.label_font.weight,
            hidden_opacity: config.hidden_opacity,
            mask_height_factor: config.mask_height_factor,
        };

        item.update_position([0.0, 0.0], surface);
        if let Some(bbox) = item.bounding_box(surface) {
            if bbox.width() > 0.0 {
                item.mask_width = bbox.width();
                item.mask_offset_x = bbox.x();
            }
        }
        surface.set_attributes(
            mask,
            GlyphAttributes {
                width: Some(item.mask_width),
                ..Default::default()
            },
            false,
        );
        item.update_position([0.0, 0.0], surface);
        Some(item)
    }

    pub fn series_id(&self) -> &str {
        &self.series_id
    }

    pub fn field_index(&self) -> usize {
        self.field_index
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    pub fn glyphs(&self) -> ItemGlyphs {
        self.glyphs
    }

    pub fn label_glyph(&self) -> GlyphId {
        self.label
    }

    pub fn mask_glyph(&self) -> GlyphId {
        self.mask
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the series behind this entry has been dropped
    pub fn is_stale(&self) -> bool {
        self.series.strong_count() == 0
    }

    pub fn local(&self) -> [f32; 2] {
        self.local
    }

    /// Stores the entry's position within the legend box. Nothing moves
    /// until the next [`LegendItem::update_position`].
    pub fn set_anchor(&mut self, x: f32, y: f32) {
        self.local = [x, y];
    }

    /// Union of the label and glyph boxes in surface coordinates
    pub fn bounding_box(&self, surface: &dyn DrawingSurface) -> Option<AABB<[f32; 2]>> {
        std::iter::once(self.label)
            .chain(self.glyphs.ids())
            .filter_map(|id| surface.bounding_box(id))
            .reduce(|acc, bbox| acc.merged(&bbox))
    }

    pub fn measured_size(&self, surface: &dyn DrawingSurface) -> [f32; 2] {
        self.bounding_box(surface)
            .map(|bbox| [bbox.width().max(0.0), bbox.height().max(0.0)])
            .unwrap_or([0.0, 0.0])
    }

    /// Absolute rectangle that reacts to clicks and hovers
    pub fn hit_region(&self, surface: &dyn DrawingSurface) -> Option<AABB<[f32; 2]>> {
        surface.bounding_box(self.mask)
    }

    /// Moves every part of the entry to `relative_to + local`, with the
    /// label and glyph centered vertically on that point
    pub fn update_position(&self, relative_to: [f32; 2], surface: &mut dyn DrawingSurface) {
        if self.is_stale() {
            log::trace!(
                "skipping position update of stale entry {}[{}]",
                self.series_id,
                self.field_index
            );
            return;
        }
        let x = relative_to[0] + self.local[0];
        let y = relative_to[1] + self.local[1];
        let font_height = self.font_height;
        let half_font_height = (font_height / 2.0).round();

        let glyph_right = match self.glyphs {
            ItemGlyphs::Filled { rect } => {
                surface.set_attributes(
                    rect,
                    GlyphAttributes {
                        width: Some(font_height),
                        height: Some(font_height),
                        translate: Some([x, y - half_font_height]),
                        ..Default::default()
                    },
                    true,
                );
                font_height
            }
            ItemGlyphs::Line { line, marker } => {
                surface.set_attributes(line, GlyphAttributes::translation(x, y), true);
                if let Some(marker) = marker {
                    surface.set_attributes(marker, GlyphAttributes::translation(x, y), true);
                }
                self.glyph_right
            }
            ItemGlyphs::Scatter { marker } => {
                surface.set_attributes(marker, GlyphAttributes::translation(x, y), true);
                self.glyph_right
            }
        };

        surface.set_attributes(
            self.label,
            GlyphAttributes::position(x + glyph_right + self.padding, y),
            true,
        );

        let mask_height = if font_height > 0.0 {
            font_height * self.mask_height_factor
        } else {
            FALLBACK_MASK_SIZE
        };
        surface.set_attributes(
            self.mask,
            GlyphAttributes {
                translate: Some([x + self.mask_offset_x, y - mask_height / 2.0]),
                height: Some(mask_height),
                ..Default::default()
            },
            false,
        );
    }

    /// Flips the entry's hidden state and hides or shows the series field.
    ///
    /// Returns the new state, or `None` when the series is gone.
    pub fn toggle_hidden(&mut self, surface: &mut dyn DrawingSurface) -> Option<bool> {
        let series = self.series.upgrade()?;
        let mut series = series.try_borrow_mut().ok()?;
        self.hidden = !self.hidden;
        if self.hidden {
            series.hide_field(self.field_index);
        } else {
            series.show_field(self.field_index);
        }
        let opacity = if self.hidden { self.hidden_opacity } else { 1.0 };
        surface.set_attributes(self.label, GlyphAttributes::opacity(opacity), true);
        Some(self.hidden)
    }

    pub fn on_hover_enter(&mut self, surface: &mut dyn DrawingSurface) {
        if self.hovered {
            return;
        }
        let Some(series) = self.series.upgrade() else {
            return;
        };
        if let Ok(mut series) = series.try_borrow_mut() {
            series.highlight_field(self.field_index);
        }
        self.hovered = true;
        surface.set_attributes(
            self.label,
            GlyphAttributes::font_weight(FontWeight::bold()),
            false,
        );
    }

    pub fn on_hover_leave(&mut self, surface: &mut dyn DrawingSurface) {
        if !self.hovered {
            return;
        }
        let Some(series) = self.series.upgrade() else {
            return;
        };
        if let Ok(mut series) = series.try_borrow_mut() {
            series.unhighlight_field(self.field_index);
        }
        self.hovered = false;
        surface.set_attributes(
            self.label,
            GlyphAttributes::font_weight(self.label_weight),
            false,
        );
    }

    pub fn set_visible(&self, visible: bool, surface: &mut dyn DrawingSurface) {
        for id in self.glyph_ids() {
            surface.set_attributes(id, GlyphAttributes::hidden(!visible), false);
        }
    }

    pub fn destroy(&self, surface: &mut dyn DrawingSurface) {
        for id in self.glyph_ids() {
            surface.destroy(id);
        }
    }

    fn glyph_ids(&self) -> Vec<GlyphId> {
        let mut ids = self.glyphs.ids();
        ids.push(self.label);
        ids.push(self.mask);
        ids
    }
}
