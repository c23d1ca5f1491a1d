use smartlegend_common::frame::SurfaceFrame;

use crate::config::LegendPosition;

/// Computes the top-left corner of a legend box of `legend_size` on the
/// given surface
pub fn resolve_anchor(
    position: LegendPosition,
    legend_size: [f32; 2],
    frame: &SurfaceFrame,
) -> [f32; 2] {
    let [legend_w, legend_h] = legend_size;
    let insets = &frame.insets;
    let [available_w, available_h] = frame.available_size();

    let center_x = || centered(insets.left, available_w, frame.width, legend_w);
    let center_y = || centered(insets.top, available_h, frame.height, legend_h);

    match position {
        LegendPosition::Left => [insets.left, center_y()],
        LegendPosition::Right => [(frame.width - legend_w).floor() - insets.right, center_y()],
        LegendPosition::Top => [center_x(), insets.top],
        LegendPosition::Bottom => [center_x(), (frame.height - legend_h).floor() - insets.bottom],
        LegendPosition::Explicit { x, y } => [x.floor() + insets.left, y.floor() + insets.top],
    }
}

/// Centers `extent` within the inset region, or within the whole surface
/// when it does not fit the inset region
fn centered(near_inset: f32, available: f32, surface: f32, extent: f32) -> f32 {
    if extent <= available {
        (near_inset + available / 2.0 - extent / 2.0).floor()
    } else {
        (surface / 2.0 - extent / 2.0).floor()
    }
}
