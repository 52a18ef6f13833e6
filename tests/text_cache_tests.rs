use plotline::api::{PlotEngine, PlotEngineConfig};
use plotline::core::{SeriesData, Viewport};
use plotline::render::NullSurface;

fn build_engine() -> PlotEngine<NullSurface> {
    let config = PlotEngineConfig::new(Viewport::new(800, 600));
    let mut engine = PlotEngine::new(NullSurface::default(), config).expect("engine init");
    engine
        .set_data(vec![SeriesData::from_points(
            (0..20).map(|i| Some((f64::from(i), f64::from(i % 7)))).collect(),
        )])
        .expect("set data");
    engine.setup_grid().expect("setup grid");
    engine
}

#[test]
fn label_measurements_populate_the_cache() {
    let engine = build_engine();
    let stats = engine.text_cache_stats();
    assert!(stats.size > 0);
    assert!(stats.misses > 0);
}

#[test]
fn an_unchanged_grid_setup_only_hits() {
    let mut engine = build_engine();
    let before = engine.text_cache_stats();

    engine.setup_grid().expect("second setup");
    let after = engine.text_cache_stats();

    assert_eq!(after.misses, before.misses);
    assert!(after.hits > before.hits);
    assert_eq!(after.size, before.size);
}

#[test]
fn entries_unused_for_a_full_pass_are_collected() {
    let mut engine = build_engine();

    // Zooming changes the committed range, so most labels are replaced; the
    // stale measurements must not linger past the next pass.
    engine.zoom((100.0, 100.0), 3.7).expect("zoom");

    let current_labels: std::collections::HashSet<&str> = engine
        .axes()
        .values()
        .flat_map(|axis| axis.ticks().iter().map(|tick| tick.label.as_str()))
        .collect();
    assert_eq!(engine.text_cache_stats().size, current_labels.len());
}

#[test]
fn resize_invalidates_the_cache_wholesale() {
    let mut engine = build_engine();
    assert!(engine.text_cache_stats().size > 0);

    engine.resize(Viewport::new(640, 480)).expect("resize");
    assert_eq!(engine.text_cache_stats().size, 0);

    engine.setup_grid().expect("setup after resize");
    assert!(engine.text_cache_stats().size > 0);
}
