use std::cell::RefCell;
use std::rc::Rc;

use float_cmp::assert_approx_eq;
use rstar::Envelope;
use smartlegend_common::frame::SurfaceFrame;
use smartlegend_guides::chart::Chart;
use smartlegend_guides::config::{LegendConfig, LegendPosition};
use smartlegend_guides::legend::placement::resolve_anchor;
use smartlegend_guides::legend::{Legend, LegendContext, LegendState};
use smartlegend_guides::series::{LegendSeries, Series, SeriesKind, SeriesRef};
use smartlegend_scenegraph::marks::mark::SceneMark;
use smartlegend_scenegraph::surface::RecordingSurface;

fn frame() -> SurfaceFrame {
    SurfaceFrame::new(400.0, 300.0, 5.0)
}

fn label_opacity(chart: &Chart, index: usize) -> f32 {
    let legend = chart.legend().unwrap();
    let label = legend.items()[index].label_glyph();
    chart.surface().glyph(label).map(SceneMark::opacity).unwrap()
}

fn item_center(chart: &Chart, index: usize) -> [f32; 2] {
    let legend = chart.legend().unwrap();
    legend.items()[index]
        .hit_region(chart.surface())
        .unwrap()
        .center()
}

#[test]
fn test_right_placement_anchor() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(
        Series::new("sales", SeriesKind::Filled, vec!["amount"])
            .title("Sales")
            .into_ref(),
    );
    chart.set_legend(Legend::new(LegendConfig::new().position(LegendPosition::Right)).unwrap());

    let legend = chart.legend().unwrap();
    assert_eq!(legend.state(), LegendState::Positioned);
    assert_eq!(legend.line_count(), 1);

    // Label 36 x 14.4 after a 14.4 box and 5 padding
    assert_approx_eq!(f32, legend.width(), 65.4, epsilon = 1e-3);
    assert_approx_eq!(f32, legend.height(), 24.6, epsilon = 1e-3);
    assert_eq!(legend.anchor(), [329.0, 137.0]);
    assert_eq!(
        legend.anchor(),
        resolve_anchor(LegendPosition::Right, [legend.width(), legend.height()], &frame())
    );

    let bbox = legend.bounding_box();
    assert_eq!([bbox.x, bbox.y], legend.anchor());
}

#[test]
fn test_click_toggles_entry_twice() {
    let typed = Rc::new(RefCell::new(Series::new(
        "s",
        SeriesKind::Line,
        vec!["a", "b"],
    )));
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(typed.clone());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());

    let center = item_center(&chart, 1);
    assert_eq!(chart.legend().unwrap().item_at(center), Some(1));

    assert_eq!(chart.click_legend(center), Some(true));
    assert!(!typed.borrow().is_field_visible(1));
    assert!(typed.borrow().is_field_visible(0));
    assert_eq!(label_opacity(&chart, 1), 0.5);

    assert_eq!(chart.click_legend(center), Some(false));
    assert!(typed.borrow().is_field_visible(1));
    assert_eq!(label_opacity(&chart, 1), 1.0);
    assert!(!chart.legend().unwrap().items()[1].is_hidden());

    assert_eq!(chart.click_legend([-50.0, -50.0]), None);
}

#[test]
fn test_hover_moves_between_entries() {
    let typed = Rc::new(RefCell::new(Series::new(
        "s",
        SeriesKind::Filled,
        vec!["a", "b"],
    )));
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(typed.clone());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());

    let first = item_center(&chart, 0);
    let second = item_center(&chart, 1);
    assert_eq!(chart.hover_legend(Some(first)), Some(0));
    assert_eq!(typed.borrow().highlighted(), Some(0));
    assert_eq!(chart.hover_legend(Some(second)), Some(1));
    assert_eq!(typed.borrow().highlighted(), Some(1));
    assert_eq!(chart.hover_legend(None), None);
    assert_eq!(typed.borrow().highlighted(), None);
}

#[test]
fn test_rebuild_releases_hovered_field() {
    let typed = Rc::new(RefCell::new(Series::new(
        "s",
        SeriesKind::Filled,
        vec!["a", "b"],
    )));
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(typed.clone());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());

    let first = item_center(&chart, 0);
    assert_eq!(chart.hover_legend(Some(first)), Some(0));
    assert_eq!(typed.borrow().highlighted(), Some(0));

    chart.add_series(Series::new("t", SeriesKind::Line, vec!["c"]).into_ref());
    assert_eq!(chart.legend().and_then(Legend::hovered), None);
    assert_eq!(typed.borrow().highlighted(), None);

    let first = item_center(&chart, 0);
    assert_eq!(chart.hover_legend(Some(first)), Some(0));
    assert!(chart.remove_legend().is_some());
    assert_eq!(typed.borrow().highlighted(), None);
}

#[test]
fn test_second_refresh_is_a_noop() {
    let series: Vec<SeriesRef> = vec![
        Series::new("a", SeriesKind::Line, vec!["x", "y", "z"]).into_ref(),
        Series::new("b", SeriesKind::Filled, vec!["w"]).into_ref(),
    ];
    let mut surface = RecordingSurface::new();
    let mut legend = Legend::new(LegendConfig::default()).unwrap();
    legend.rebuild(&mut LegendContext {
        series: &series,
        frame: frame(),
        surface: &mut surface,
    });
    surface.reset_counters();
    let fingerprint = surface.fingerprint();

    let refreshed = legend.refresh_positions(&mut LegendContext {
        series: &series,
        frame: frame(),
        surface: &mut surface,
    });
    assert!(!refreshed);
    assert_eq!(surface.attribute_updates(), 0);
    assert_eq!(surface.fingerprint(), fingerprint);
}

#[test]
fn test_resize_moves_legend() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(Series::new("a", SeriesKind::Scatter, vec!["x"]).into_ref());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());
    let before = chart.legend().unwrap().anchor();

    chart.surface_mut().reset_counters();
    chart.resize(frame());
    assert_eq!(chart.surface().attribute_updates(), 0);

    chart.resize(SurfaceFrame::new(600.0, 500.0, 5.0));
    let after = chart.legend().unwrap().anchor();
    assert_ne!(before, after);
    assert!(chart.surface().attribute_updates() > 0);
}

#[test]
fn test_hide_and_show_keep_geometry() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(Series::new("a", SeriesKind::Line, vec!["x", "y"]).into_ref());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());
    let bbox = chart.legend().unwrap().bounding_box();
    let center = item_center(&chart, 0);

    chart.hide_legend();
    assert!(chart.surface().glyphs().all(|(_, mark)| mark.hidden()));
    assert_eq!(chart.legend().unwrap().item_at(center), None);
    assert_eq!(chart.click_legend(center), None);

    chart.show_legend();
    assert!(chart.surface().glyphs().all(|(_, mark)| !mark.hidden()));
    assert_eq!(chart.legend().unwrap().bounding_box(), bbox);
    assert_eq!(chart.legend().unwrap().item_at(center), Some(0));
}

#[test]
fn test_redraw_while_hidden_keeps_entries() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(Series::new("a", SeriesKind::Filled, vec!["x"]).into_ref());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());
    chart.hide_legend();

    let label = chart.legend().unwrap().items()[0].label_glyph();
    chart.surface_mut().reset_counters();
    chart.redraw();
    assert_eq!(chart.legend().unwrap().items()[0].label_glyph(), label);
    assert_eq!(chart.surface().attribute_updates(), 0);
}

#[test]
fn test_legend_created_hidden() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(Series::new("a", SeriesKind::Filled, vec!["x"]).into_ref());
    chart.set_legend(Legend::new(LegendConfig::new().visible(false)).unwrap());

    let legend = chart.legend().unwrap();
    assert_eq!(legend.len(), 1);
    assert!(!legend.is_visible());
    assert!(chart.surface().glyphs().all(|(_, mark)| mark.hidden()));

    chart.show_legend();
    assert!(chart.surface().glyphs().all(|(_, mark)| !mark.hidden()));
    assert!(chart.legend().unwrap().anchor()[0] > 0.0);
}

#[test]
fn test_rebuilds_do_not_leak_listeners() {
    let typed = Rc::new(RefCell::new(Series::new("s", SeriesKind::Line, vec!["a"])));
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(typed.clone());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());

    for _ in 0..5 {
        chart.rebuild_legend();
        chart.redraw();
    }
    assert_eq!(typed.borrow().listener_count(), 1);

    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());
    assert_eq!(typed.borrow().listener_count(), 1);

    drop(chart.remove_legend());
    assert_eq!(typed.borrow().listener_count(), 0);
}

#[test]
fn test_title_change_marks_legend_stale() {
    let typed = Rc::new(RefCell::new(Series::new("s", SeriesKind::Line, vec!["a"])));
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(typed.clone());
    chart.set_legend(Legend::new(LegendConfig::default()).unwrap());
    assert!(!chart.sync_legend());

    typed.borrow_mut().set_title("Revenue");
    assert!(chart.legend().unwrap().is_stale());
    assert!(chart.sync_legend());
    assert_eq!(chart.legend().unwrap().items()[0].label_text(), "Revenue");
    assert!(!chart.sync_legend());

    // Same label, no notification
    typed.borrow_mut().set_title("Revenue");
    assert!(!chart.legend().unwrap().is_stale());
}

#[test]
fn test_dropped_series_entries_are_noops() {
    let series: Vec<SeriesRef> =
        vec![Series::new("a", SeriesKind::Filled, vec!["x", "y"]).into_ref()];
    let mut surface = RecordingSurface::new();
    let mut legend = Legend::new(LegendConfig::default()).unwrap();
    legend.rebuild(&mut LegendContext {
        series: &series,
        frame: frame(),
        surface: &mut surface,
    });
    drop(series);

    assert!(legend.items().iter().all(|item| item.is_stale()));
    surface.reset_counters();
    assert_eq!(legend.toggle_item(0, &mut surface), None);
    assert_eq!(legend.toggle_item(7, &mut surface), None);
    assert_eq!(surface.attribute_updates(), 0);

    let no_series: Vec<SeriesRef> = Vec::new();
    legend.rebuild(&mut LegendContext {
        series: &no_series,
        frame: frame(),
        surface: &mut surface,
    });
    assert!(legend.is_empty());
}

#[test]
fn test_empty_legend_is_padding_box() {
    let mut chart = Chart::with_recording_surface(frame());
    chart.set_legend(Legend::new(LegendConfig::new().padding(7.0)).unwrap());

    let legend = chart.legend().unwrap();
    assert!(legend.is_empty());
    assert_eq!(legend.width(), 14.0);
    assert_eq!(legend.height(), 14.0);
    assert_eq!(legend.line_count(), 0);
    assert_eq!(legend.items_per_line(), 0);
    assert_eq!(legend.state(), LegendState::Positioned);
}

#[test]
fn test_many_entries_wrap_on_small_surface() {
    let fields: Vec<String> = (0..24).map(|i| format!("field {i}")).collect();
    let mut chart = Chart::with_recording_surface(SurfaceFrame::new(300.0, 120.0, 5.0));
    chart.add_series(Series::new("s", SeriesKind::Filled, fields).into_ref());
    chart.set_legend(Legend::new(LegendConfig::new().position(LegendPosition::Left)).unwrap());

    let legend = chart.legend().unwrap();
    assert!(legend.line_count() > 1);
    assert!(legend.line_count() * legend.items_per_line() >= 24);
    assert!(legend.line_count() * legend.items_per_line() - 24 < legend.items_per_line());

    // Entries of the second column sit right of the first column
    let per_line = legend.items_per_line();
    let first = legend.items()[0].local();
    let next_column = legend.items()[per_line].local();
    assert!(next_column[0] > first[0]);
    assert_eq!(next_column[1], first[1]);
}

#[cfg(feature = "serde")]
#[test]
fn test_legend_from_json_config() {
    let config: LegendConfig = serde_json::from_str(
        r#"{
            "position": {"explicit": {"x": 20.5, "y": 30.2}},
            "padding": 4,
            "item_spacing": 6,
            "label_font": "italic bold 10px Verdana"
        }"#,
    )
    .unwrap();
    let mut chart = Chart::with_recording_surface(frame());
    chart.add_series(Series::new("a", SeriesKind::Line, vec!["x"]).into_ref());
    chart.set_legend(Legend::new(config).unwrap());

    let legend = chart.legend().unwrap();
    assert_eq!(legend.anchor(), [25.0, 35.0]);
    assert!(legend.config().is_vertical());
    assert!(legend.config().label_font.is_bold());
}
