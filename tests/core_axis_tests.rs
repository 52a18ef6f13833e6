use plotline::PlotError;
use plotline::core::{Axis, AxisId, AxisOptions};

fn data_axis(id: AxisId, values: &[f64]) -> Axis {
    let mut axis = Axis::new(id, AxisOptions::default());
    for value in values {
        axis.observe(*value);
    }
    axis
}

#[test]
fn transform_round_trip_within_tolerance() {
    let mut axis = data_axis(AxisId::X1, &[10.0, 110.0]);
    axis.set_range().expect("range");
    axis.compute_scale(1000.0).expect("scale");
    let transform = axis.transform().expect("committed");

    let original = 42.5;
    let px = transform.p2c(original);
    let recovered = transform.c2p(px);
    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn set_range_never_commits_a_zero_span() {
    let mut axis = data_axis(AxisId::X1, &[5.0]);
    axis.set_range().expect("range");
    assert_eq!(axis.range(), (4.95, 5.05));

    let mut axis = data_axis(AxisId::X1, &[0.0]);
    axis.set_range().expect("range");
    assert_eq!(axis.range(), (-1.0, 1.0));
}

#[test]
fn zero_span_respects_a_fixed_bound() {
    let mut axis = Axis::new(
        AxisId::X1,
        AxisOptions {
            min: Some(5.0),
            ..AxisOptions::default()
        },
    );
    axis.observe(5.0);
    axis.set_range().expect("range");

    let (min, max) = axis.range();
    assert_eq!(min, 5.0);
    assert!(max > 5.0);
}

#[test]
fn user_overrides_win_over_data_extent() {
    let mut axis = data_axis(AxisId::Y1, &[0.0, 1000.0]);
    axis.options_mut().min = Some(10.0);
    axis.options_mut().max = Some(20.0);
    axis.set_range().expect("range");
    assert_eq!(axis.range(), (10.0, 20.0));
}

#[test]
fn autoscale_margin_expands_unfixed_bounds_only() {
    let mut axis = Axis::new(
        AxisId::Y1,
        AxisOptions {
            max: Some(10.0),
            autoscale_margin: Some(0.1),
            ..AxisOptions::default()
        },
    );
    axis.observe(2.0);
    axis.observe(8.0);
    axis.set_range().expect("range");

    let (min, max) = axis.range();
    assert_eq!(max, 10.0);
    // span = 10 - 2 = 8, margin 10% of span below the unfixed bound
    assert!((min - 1.2).abs() <= 1e-12);
}

#[test]
fn margin_never_flips_the_sign_of_uniform_data() {
    let mut axis = Axis::new(
        AxisId::Y1,
        AxisOptions {
            autoscale_margin: Some(0.5),
            ..AxisOptions::default()
        },
    );
    axis.observe(-3.0);
    axis.observe(-1.0);
    axis.set_range().expect("range");

    let (min, max) = axis.range();
    assert_eq!(max, 0.0);
    assert!(min < -3.0);
}

#[test]
fn compute_scale_rejects_empty_pixel_extent() {
    let mut axis = data_axis(AxisId::X1, &[0.0, 1.0]);
    axis.set_range().expect("range");

    let err = axis.compute_scale(0.0).expect_err("zero extent must fail");
    assert!(matches!(err, PlotError::InvalidPlotArea { .. }));

    let err = axis.compute_scale(-10.0).expect_err("negative extent");
    assert!(matches!(err, PlotError::InvalidPlotArea { .. }));
}

#[test]
fn range_change_invalidates_the_transform() {
    let mut axis = data_axis(AxisId::X1, &[0.0, 1.0]);
    axis.set_range().expect("range");
    axis.compute_scale(100.0).expect("scale");
    assert!(axis.transform().is_some());

    axis.options_mut().min = Some(-5.0);
    axis.set_range().expect("range");
    assert!(axis.transform().is_none());
}

#[test]
fn conflicting_overrides_are_a_configuration_error() {
    let mut axis = Axis::new(
        AxisId::X1,
        AxisOptions {
            min: Some(10.0),
            max: Some(5.0),
            ..AxisOptions::default()
        },
    );
    let err = axis.set_range().expect_err("min > max must fail");
    assert!(matches!(err, PlotError::InvalidConfig(_)));
}
