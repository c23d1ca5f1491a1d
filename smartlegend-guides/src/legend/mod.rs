pub mod glyph;
pub mod hit;
pub mod item;
pub mod layout;
pub mod placement;

use std::cell::Cell;
use std::rc::Rc;

use itertools::Itertools;
use smartlegend_common::frame::SurfaceFrame;
use smartlegend_scenegraph::attributes::GlyphAttributes;
use smartlegend_scenegraph::marks::rect::SceneRectMark;
use smartlegend_scenegraph::surface::{DrawingSurface, GlyphId};

use crate::config::{LegendConfig, LegendPosition};
use crate::error::SmartLegendError;
use crate::legend::hit::{HitIndex, ItemHitRegion};
use crate::legend::item::LegendItem;
use crate::legend::layout::{WrapConfig, WrapLayout};
use crate::series::{SeriesRef, SubscriptionId, WeakSeriesRef};

/// The host state a legend reads and draws into during one call
pub struct LegendContext<'a> {
    pub series: &'a [SeriesRef],
    pub frame: SurfaceFrame,
    pub surface: &'a mut dyn DrawingSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendState {
    /// No entries have been created
    Empty,
    /// Entries exist but have not been measured and wrapped
    Built,
    /// Entries are wrapped and have local positions
    Positioned,
}

/// Legend box in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LegendBBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Chart legend that wraps one entry per (series, field) into a grid and
/// places it along an edge of the chart surface
#[derive(Debug)]
pub struct Legend {
    config: LegendConfig,
    items: Vec<LegendItem>,
    state: LegendState,
    layout: WrapLayout,
    anchor: [f32; 2],
    /// Box the entries were last moved to
    applied: Option<LegendBBox>,
    frame_glyph: Option<GlyphId>,
    stale: Rc<Cell<bool>>,
    subscriptions: Vec<(WeakSeriesRef, SubscriptionId)>,
    hit_index: HitIndex,
    hovered: Option<usize>,
    visible: bool,
}

impl Legend {
    pub fn new(config: LegendConfig) -> Result<Self, SmartLegendError> {
        config.validate()?;
        let visible = config.visible;
        Ok(Self {
            config,
            items: Vec::new(),
            state: LegendState::Empty,
            layout: WrapLayout::default(),
            anchor: [0.0, 0.0],
            applied: None,
            frame_glyph: None,
            stale: Rc::new(Cell::new(false)),
            subscriptions: Vec::new(),
            hit_index: HitIndex::default(),
            hovered: None,
            visible,
        })
    }

    pub fn config(&self) -> &LegendConfig {
        &self.config
    }

    pub fn state(&self) -> LegendState {
        self.state
    }

    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layout(&self) -> &WrapLayout {
        &self.layout
    }

    pub fn width(&self) -> f32 {
        self.layout.width
    }

    pub fn height(&self) -> f32 {
        self.layout.height
    }

    pub fn line_count(&self) -> usize {
        self.layout.line_count
    }

    pub fn items_per_line(&self) -> usize {
        self.layout.items_per_line
    }

    pub fn position(&self) -> LegendPosition {
        self.config.position
    }

    pub fn anchor(&self) -> [f32; 2] {
        self.anchor
    }

    pub fn bounding_box(&self) -> LegendBBox {
        LegendBBox {
            x: self.anchor[0],
            y: self.anchor[1],
            width: self.layout.width,
            height: self.layout.height,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a series label changed since the entries were built
    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn frame_glyph(&self) -> Option<GlyphId> {
        self.frame_glyph
    }

    /// Moves the legend to another edge. Takes effect on the next redraw.
    pub fn set_position(&mut self, position: LegendPosition) {
        if self.config.position != position {
            self.config.position = position;
            self.stale.set(true);
        }
    }

    /// Recreates, wraps and places every entry
    pub fn rebuild(&mut self, ctx: &mut LegendContext) {
        self.rebuild_entries(ctx);
        self.measure_and_wrap(ctx);
        self.refresh_positions(ctx);
    }

    /// Rebuilds the legend if it is displayed or was never created.
    ///
    /// A hidden legend keeps its entries and is not moved.
    pub fn redraw(&mut self, ctx: &mut LegendContext) {
        if self.state == LegendState::Empty || self.visible {
            self.rebuild_entries(ctx);
            self.measure_and_wrap(ctx);
        }
        if self.visible {
            self.refresh_positions(ctx);
        }
    }

    /// Redraws when a series label changed or the position moved since the
    /// last build. Returns whether a redraw happened.
    pub fn sync(&mut self, ctx: &mut LegendContext) -> bool {
        if !self.stale.get() {
            return false;
        }
        log::debug!("legend is stale, redrawing");
        self.redraw(ctx);
        true
    }

    /// Replaces every entry with freshly built ones, in series order and
    /// then field order
    pub fn rebuild_entries(&mut self, ctx: &mut LegendContext) {
        self.clear_entries(ctx.surface);

        for series in ctx.series {
            self.subscribe(series);
            let (show, field_count) = match series.try_borrow() {
                Ok(s) => (s.show_in_legend(), s.field_count()),
                Err(_) => continue,
            };
            if !show {
                continue;
            }
            for field_index in 0..field_count {
                if let Some(item) =
                    LegendItem::build(series, field_index, &self.config, ctx.surface)
                {
                    self.items.push(item);
                }
            }
        }

        if self.frame_glyph.is_none() {
            self.frame_glyph = Some(ctx.surface.add_glyph(
                SceneRectMark {
                    name: "legend_frame".to_string(),
                    fill: self.config.box_fill,
                    stroke: self.config.box_stroke,
                    stroke_width: self.config.box_stroke_width,
                    zindex: Some(self.config.zindex),
                    ..Default::default()
                }
                .into(),
            ));
        }
        if !self.visible {
            self.apply_visibility(ctx.surface);
        }

        log::debug!(
            "rebuilt legend with {} entries from {} series",
            self.items.len(),
            ctx.series.len()
        );
        self.state = LegendState::Built;
        self.applied = None;
        self.stale.set(false);
    }

    /// Measures every entry and wraps them into the surface's available
    /// area, assigning each entry its position within the legend box
    pub fn measure_and_wrap(&mut self, ctx: &mut LegendContext) -> &WrapLayout {
        let sizes: Vec<[f32; 2]> = self
            .items
            .iter()
            .map(|item| item.measured_size(&*ctx.surface))
            .collect();
        let config = WrapConfig {
            max_box: ctx.frame.available_size(),
            vertical: self.config.is_vertical(),
            padding: self.config.padding,
            item_spacing: self.config.item_spacing,
        };
        self.layout = layout::measure_and_wrap(&sizes, &config);
        for (item, [x, y]) in self
            .items
            .iter_mut()
            .zip_eq(self.layout.positions.iter().copied())
        {
            item.set_anchor(x, y);
        }

        self.state = LegendState::Positioned;
        self.applied = None;
        &self.layout
    }

    /// Wraps and places the existing entries again, e.g. after the surface
    /// was resized
    pub fn relayout(&mut self, ctx: &mut LegendContext) {
        if self.state == LegendState::Empty {
            return;
        }
        self.measure_and_wrap(ctx);
        self.refresh_positions(ctx);
    }

    pub fn resolve_anchor(&self, frame: &SurfaceFrame) -> [f32; 2] {
        placement::resolve_anchor(self.config.position, self.layout.size(), frame)
    }

    /// Moves every entry and the frame to the current anchor.
    ///
    /// Returns `false` without touching the surface when the legend is
    /// hidden, not yet wrapped, or already placed at the same box.
    pub fn refresh_positions(&mut self, ctx: &mut LegendContext) -> bool {
        if self.state != LegendState::Positioned {
            log::trace!("legend is {:?}, nothing to place", self.state);
            return false;
        }
        if !self.visible {
            log::trace!("legend hidden, skipping refresh");
            return false;
        }

        let anchor = self.resolve_anchor(&ctx.frame);
        let bbox = LegendBBox {
            x: anchor[0],
            y: anchor[1],
            width: self.layout.width,
            height: self.layout.height,
        };
        if self.applied == Some(bbox) {
            log::trace!("legend already placed at {bbox:?}");
            return false;
        }

        self.anchor = anchor;
        for item in &self.items {
            item.update_position(anchor, ctx.surface);
        }
        if let Some(frame_glyph) = self.frame_glyph {
            ctx.surface.set_attributes(
                frame_glyph,
                GlyphAttributes {
                    translate: Some(anchor),
                    width: Some(bbox.width),
                    height: Some(bbox.height),
                    ..Default::default()
                },
                true,
            );
        }

        let regions = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.hit_region(&*ctx.surface)
                    .map(|envelope| ItemHitRegion { index, envelope })
            })
            .collect();
        self.hit_index = HitIndex::new(regions);
        self.applied = Some(bbox);
        true
    }

    /// Shows or hides every entry and the frame without changing geometry
    pub fn set_visible(&mut self, visible: bool, surface: &mut dyn DrawingSurface) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            self.clear_hover(surface);
        }
        self.apply_visibility(surface);
    }

    pub fn show(&mut self, ctx: &mut LegendContext) {
        self.set_visible(true, ctx.surface);
        self.refresh_positions(ctx);
    }

    pub fn hide(&mut self, ctx: &mut LegendContext) {
        self.set_visible(false, ctx.surface);
    }

    /// Index of the entry under `point`. A hidden legend has no entries
    /// under any point.
    pub fn item_at(&self, point: [f32; 2]) -> Option<usize> {
        if !self.visible || self.applied.is_none() {
            return None;
        }
        self.hit_index.locate(point)
    }

    /// Toggles the hidden state of an entry, returning the new state
    pub fn toggle_item(&mut self, index: usize, surface: &mut dyn DrawingSurface) -> Option<bool> {
        self.items.get_mut(index)?.toggle_hidden(surface)
    }

    /// Toggles the entry under `point`
    pub fn click(&mut self, point: [f32; 2], surface: &mut dyn DrawingSurface) -> Option<bool> {
        let index = self.item_at(point)?;
        self.toggle_item(index, surface)
    }

    /// Moves the hover to the entry under `point`. `None` means the pointer
    /// left the legend.
    pub fn hover(
        &mut self,
        point: Option<[f32; 2]>,
        surface: &mut dyn DrawingSurface,
    ) -> Option<usize> {
        let target = point.and_then(|p| self.item_at(p));
        if target != self.hovered {
            self.clear_hover(surface);
            if let Some(item) = target.and_then(|i| self.items.get_mut(i)) {
                item.on_hover_enter(surface);
            }
            self.hovered = target;
        }
        self.hovered
    }

    /// Removes every glyph and title subscription. The legend can be
    /// rebuilt afterwards.
    pub fn destroy(&mut self, surface: &mut dyn DrawingSurface) {
        self.clear_entries(surface);
        if let Some(frame_glyph) = self.frame_glyph.take() {
            surface.destroy(frame_glyph);
        }
        self.layout = WrapLayout::default();
        self.state = LegendState::Empty;
        self.applied = None;
    }

    fn clear_hover(&mut self, surface: &mut dyn DrawingSurface) {
        if let Some(item) = self.hovered.take().and_then(|i| self.items.get_mut(i)) {
            item.on_hover_leave(surface);
        }
    }

    fn apply_visibility(&self, surface: &mut dyn DrawingSurface) {
        for item in &self.items {
            item.set_visible(self.visible, surface);
        }
        if let Some(frame_glyph) = self.frame_glyph {
            surface.set_attributes(frame_glyph, GlyphAttributes::hidden(!self.visible), false);
        }
    }

    fn clear_entries(&mut self, surface: &mut dyn DrawingSurface) {
        self.clear_hover(surface);
        for item in self.items.drain(..) {
            item.destroy(surface);
        }
        self.unsubscribe_all();
        self.hit_index = HitIndex::default();
        self.hovered = None;
    }

    fn subscribe(&mut self, series: &SeriesRef) {
        let Ok(mut s) = series.try_borrow_mut() else {
            log::warn!("series is borrowed, not watching its title");
            return;
        };
        let stale = Rc::downgrade(&self.stale);
        let id = s.subscribe_title_change(Box::new(move |series_id: &str| {
            log::trace!("title of series {series_id} changed");
            if let Some(stale) = stale.upgrade() {
                stale.set(true);
            }
        }));
        self.subscriptions.push((Rc::downgrade(series), id));
    }

    fn unsubscribe_all(&mut self) {
        for (series, id) in self.subscriptions.drain(..) {
            let Some(series) = series.upgrade() else {
                continue;
            };
            if let Ok(mut s) = series.try_borrow_mut() {
                s.unsubscribe_title_change(id);
            };
        }
    }
}

impl Drop for Legend {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartlegend_scenegraph::surface::RecordingSurface;

    use crate::series::{Series, SeriesKind};

    fn series_list() -> Vec<SeriesRef> {
        vec![
            Series::new("a", SeriesKind::Line, vec!["x", "y"]).into_ref(),
            Series::new("b", SeriesKind::Filled, vec!["z"]).into_ref(),
            Series::new("c", SeriesKind::Scatter, vec!["w"])
                .show_in_legend(false)
                .into_ref(),
        ]
    }

    #[test]
    fn test_state_transitions() {
        let series = series_list();
        let mut surface = RecordingSurface::new();
        let mut ctx = LegendContext {
            series: &series,
            frame: SurfaceFrame::new(400.0, 300.0, 5.0),
            surface: &mut surface,
        };
        let mut legend = Legend::new(LegendConfig::default()).unwrap();
        assert_eq!(legend.state(), LegendState::Empty);
        assert!(!legend.refresh_positions(&mut ctx));

        legend.rebuild_entries(&mut ctx);
        assert_eq!(legend.state(), LegendState::Built);
        assert_eq!(legend.len(), 3);
        assert!(!legend.refresh_positions(&mut ctx));

        legend.measure_and_wrap(&mut ctx);
        assert_eq!(legend.state(), LegendState::Positioned);
        assert!(legend.refresh_positions(&mut ctx));
        assert!(!legend.refresh_positions(&mut ctx));
    }

    #[test]
    fn test_entries_follow_series_then_field_order() {
        let series = series_list();
        let mut surface = RecordingSurface::new();
        let mut ctx = LegendContext {
            series: &series,
            frame: SurfaceFrame::new(400.0, 300.0, 5.0),
            surface: &mut surface,
        };
        let mut legend = Legend::new(LegendConfig::default()).unwrap();
        legend.rebuild(&mut ctx);
        let labels: Vec<_> = legend.items().iter().map(LegendItem::label_text).collect();
        assert_eq!(labels, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Legend::new(LegendConfig::new().item_spacing(f32::NAN)).is_err());
    }

    #[test]
    fn test_set_position_marks_stale() {
        let mut legend = Legend::new(LegendConfig::default()).unwrap();
        legend.set_position(LegendPosition::Bottom);
        assert!(!legend.is_stale());
        legend.set_position(LegendPosition::Right);
        assert!(legend.is_stale());
        assert_eq!(legend.position(), LegendPosition::Right);
    }
}
