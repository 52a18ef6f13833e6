use plotline::PlotError;
use plotline::api::{PlotEngine, PlotEngineConfig};
use plotline::core::{AxisDirection, AxisId, AxisOptions, Viewport};
use plotline::render::NullSurface;

fn build_engine() -> PlotEngine<NullSurface> {
    let config = PlotEngineConfig::new(Viewport::new(800, 600))
        .with_x_axis(AxisOptions {
            min: Some(0.0),
            max: Some(100.0),
            ..AxisOptions::default()
        })
        .with_y_axis(AxisOptions {
            min: Some(0.0),
            max: Some(1.0),
            ..AxisOptions::default()
        });
    let mut engine = PlotEngine::new(NullSurface::default(), config).expect("engine init");
    engine.setup_grid().expect("setup grid");
    engine
}

#[test]
fn drag_selection_maps_to_data_ranges_on_every_axis() {
    let mut engine = build_engine();
    let tx = engine.transform(AxisId::X1).expect("x transform");
    let ty = engine.transform(AxisId::Y1).expect("y transform");

    engine.begin_selection(10.0, 20.0).expect("begin");
    assert!(engine.update_selection(110.0, 140.0).expect("update"));

    let ranges = engine
        .finish_selection()
        .expect("finish")
        .expect("selection large enough");
    assert_eq!(ranges.ranges.len(), 2);

    let x_range = ranges
        .ranges
        .iter()
        .find(|range| range.axis.direction == AxisDirection::Horizontal)
        .expect("x range");
    let expected_from = tx.c2p(10.0).min(tx.c2p(110.0));
    let expected_to = tx.c2p(10.0).max(tx.c2p(110.0));
    assert!((x_range.from - expected_from).abs() <= 1e-9);
    assert!((x_range.to - expected_to).abs() <= 1e-9);

    let y_range = ranges
        .ranges
        .iter()
        .find(|range| range.axis.direction == AxisDirection::Vertical)
        .expect("y range");
    // Vertical pixels grow downward, so the smaller pixel maps to the
    // larger value; ranges still come out ordered.
    assert!(y_range.from < y_range.to);
    assert!((y_range.to - ty.c2p(20.0)).abs() <= 1e-9);
}

#[test]
fn undersized_selection_yields_none_and_clears() {
    let mut engine = build_engine();

    engine.begin_selection(100.0, 100.0).expect("begin");
    engine.update_selection(102.0, 101.0).expect("update");

    let result = engine.finish_selection().expect("finish");
    assert!(result.is_none());
    assert!(engine.selection_rect().is_none());
}

#[test]
fn selection_corners_clamp_to_the_plot_rectangle() {
    let mut engine = build_engine();

    engine.begin_selection(-50.0, -50.0).expect("begin");
    engine.update_selection(10_000.0, 10_000.0).expect("update");

    let rect = engine.selection_rect().expect("active");
    assert_eq!((rect.x1, rect.y1), (0.0, 0.0));
    assert!((rect.x2 - engine.plot_width()).abs() <= 1e-9);
    assert!((rect.y2 - engine.plot_height()).abs() <= 1e-9);
}

#[test]
fn selection_updates_trigger_overlay_redraws() {
    let mut engine = build_engine();
    engine.draw().expect("initial draw");
    let before = engine.surface().render_count;

    engine.begin_selection(10.0, 10.0).expect("begin");
    engine.update_selection(200.0, 200.0).expect("update");

    assert!(engine.surface().render_count > before);
    let frame = engine.surface().last_frame.as_ref().expect("frame");
    // The built-in overlay draws the selection rectangle fill.
    assert!(frame.rects.len() >= 2);
}

#[test]
fn clear_selection_removes_the_overlay() {
    let mut engine = build_engine();

    engine.begin_selection(10.0, 10.0).expect("begin");
    engine.update_selection(200.0, 200.0).expect("update");
    engine.clear_selection().expect("clear");

    assert!(engine.selection_rect().is_none());
    let frame = engine.surface().last_frame.as_ref().expect("frame");
    assert_eq!(frame.rects.len(), 1);
}

#[test]
fn selection_requires_a_committed_grid() {
    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine = PlotEngine::new(NullSurface::default(), config).expect("engine init");

    let err = engine.begin_selection(10.0, 10.0).expect_err("no grid yet");
    assert!(matches!(err, PlotError::InvalidConfig(_)));
}
