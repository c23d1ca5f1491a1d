use smartlegend_common::frame::SurfaceFrame;
use smartlegend_scenegraph::surface::{DrawingSurface, RecordingSurface};

use crate::legend::{Legend, LegendContext};
use crate::series::SeriesRef;

/// Minimal chart host: owns the series, the drawing surface and at most one
/// legend, and forwards its lifecycle events to the legend
pub struct Chart<S: DrawingSurface = RecordingSurface> {
    series: Vec<SeriesRef>,
    frame: SurfaceFrame,
    surface: S,
    legend: Option<Legend>,
}

impl Chart<RecordingSurface> {
    pub fn with_recording_surface(frame: SurfaceFrame) -> Self {
        Self::new(frame, RecordingSurface::new())
    }
}

impl<S: DrawingSurface> Chart<S> {
    pub fn new(frame: SurfaceFrame, surface: S) -> Self {
        Self {
            series: Vec::new(),
            frame,
            surface,
            legend: None,
        }
    }

    pub fn series(&self) -> &[SeriesRef] {
        &self.series
    }

    pub fn frame(&self) -> &SurfaceFrame {
        &self.frame
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    /// Attaches a legend, destroying the glyphs of any previous one, and
    /// draws it
    pub fn set_legend(&mut self, legend: Legend) {
        if let Some(mut previous) = self.legend.take() {
            previous.destroy(&mut self.surface);
        }
        self.legend = Some(legend);
        self.redraw();
    }

    /// Detaches the legend after removing its glyphs
    pub fn remove_legend(&mut self) -> Option<Legend> {
        let mut legend = self.legend.take()?;
        legend.destroy(&mut self.surface);
        Some(legend)
    }

    pub fn add_series(&mut self, series: SeriesRef) {
        self.series.push(series);
        self.rebuild_legend();
    }

    /// Removes a series by id. Entries of the removed series are dropped by
    /// the legend rebuild that follows.
    pub fn remove_series(&mut self, id: &str) -> Option<SeriesRef> {
        let index = self
            .series
            .iter()
            .position(|s| s.try_borrow().is_ok_and(|s| s.id() == id))?;
        let removed = self.series.remove(index);
        self.rebuild_legend();
        Some(removed)
    }

    pub fn resize(&mut self, frame: SurfaceFrame) {
        if self.frame == frame {
            return;
        }
        self.frame = frame;
        self.with_legend(|legend, ctx| legend.relayout(ctx));
    }

    pub fn redraw(&mut self) {
        self.with_legend(|legend, ctx| legend.redraw(ctx));
    }

    pub fn rebuild_legend(&mut self) {
        self.with_legend(|legend, ctx| legend.rebuild(ctx));
    }

    /// Redraws the legend if a series title changed since it was built
    pub fn sync_legend(&mut self) -> bool {
        self.with_legend(|legend, ctx| legend.sync(ctx))
            .unwrap_or(false)
    }

    pub fn show_legend(&mut self) {
        self.with_legend(|legend, ctx| legend.show(ctx));
    }

    pub fn hide_legend(&mut self) {
        self.with_legend(|legend, ctx| legend.hide(ctx));
    }

    /// Toggles the legend entry under `point`, returning its new hidden state
    pub fn click_legend(&mut self, point: [f32; 2]) -> Option<bool> {
        let legend = self.legend.as_mut()?;
        legend.click(point, &mut self.surface)
    }

    /// Returns the index of the hovered legend entry
    pub fn hover_legend(&mut self, point: Option<[f32; 2]>) -> Option<usize> {
        let legend = self.legend.as_mut()?;
        legend.hover(point, &mut self.surface)
    }

    fn with_legend<R>(
        &mut self,
        f: impl FnOnce(&mut Legend, &mut LegendContext) -> R,
    ) -> Option<R> {
        let legend = self.legend.as_mut()?;
        let mut ctx = LegendContext {
            series: &self.series,
            frame: self.frame,
            surface: &mut self.surface,
        };
        Some(f(legend, &mut ctx))
    }
}
