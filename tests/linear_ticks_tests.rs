use plotline::core::{Axis, AxisId, AxisOptions, LinearTickGenerator, TickGenerator, TickSize};

fn committed_axis(min: f64, max: f64, pixel_hint: f64, options: AxisOptions) -> Axis {
    let mut axis = Axis::new(AxisId::X1, options);
    axis.observe(min);
    axis.observe(max);
    axis.set_pixel_hint(pixel_hint);
    axis.set_range().expect("range");
    axis
}

#[test]
fn generation_is_idempotent_for_a_committed_range() {
    let axis = committed_axis(-3.7, 19.2, 900.0, AxisOptions::default());

    let first = LinearTickGenerator.generate(&axis);
    let second = LinearTickGenerator.generate(&axis);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn steps_come_from_the_nice_multiplier_set() {
    for (min, max) in [(0.0, 1.0), (0.0, 10.0), (-50.0, 50.0), (0.0, 0.007)] {
        let axis = committed_axis(min, max, 800.0, AxisOptions::default());
        let ticks = LinearTickGenerator.generate(&axis);
        assert!(ticks.len() >= 2, "range {min}..{max} produced {ticks:?}");

        let step = ticks[1].value - ticks[0].value;
        let magnitude = 10f64.powf(step.abs().log10().floor());
        let norm = step / magnitude;
        let is_nice = [1.0, 2.0, 2.5, 5.0]
            .iter()
            .any(|candidate| (norm - candidate).abs() <= 1e-9);
        assert!(is_nice, "step {step} is not a nice multiple");
    }
}

#[test]
fn ticks_stay_inside_the_committed_range() {
    let axis = committed_axis(0.13, 9.87, 800.0, AxisOptions::default());
    let (min, max) = axis.range();

    for tick in LinearTickGenerator.generate(&axis) {
        assert!(tick.value >= min - 1e-9);
        assert!(tick.value <= max + 1e-9);
    }
}

#[test]
fn explicit_tick_size_override_is_honored() {
    let options = AxisOptions {
        tick_size: Some(TickSize::Units(0.25)),
        ..AxisOptions::default()
    };
    let axis = committed_axis(0.0, 1.0, 800.0, options);

    let ticks = LinearTickGenerator.generate(&axis);
    assert_eq!(ticks.len(), 5);
    assert_eq!(ticks[1].label, "0.25");
}

#[test]
fn tick_decimals_cap_label_precision() {
    let options = AxisOptions {
        ticks: Some(4),
        tick_decimals: Some(0),
        ..AxisOptions::default()
    };
    let axis = committed_axis(0.0, 9.0, 800.0, options);

    for tick in LinearTickGenerator.generate(&axis) {
        assert!(!tick.label.contains('.'), "label {} has decimals", tick.label);
    }
}

#[test]
fn format_matches_generated_labels() {
    let axis = committed_axis(0.0, 10.0, 800.0, AxisOptions::default());
    let ticks = LinearTickGenerator.generate(&axis);

    for tick in &ticks {
        assert_eq!(LinearTickGenerator.format(tick.value, &axis), tick.label);
    }
}

#[test]
fn labels_never_show_negative_zero() {
    let axis = committed_axis(-1.0, 1.0, 800.0, AxisOptions::default());
    for tick in LinearTickGenerator.generate(&axis) {
        assert_ne!(tick.label, "-0");
        assert_ne!(tick.label, "-0.0");
    }
}

#[test]
fn tiny_step_against_large_offset_terminates() {
    // A step far below the float resolution at this offset would stall a
    // repeated-addition walk; the generator must terminate regardless.
    let options = AxisOptions {
        tick_size: Some(TickSize::Units(1e-12)),
        ..AxisOptions::default()
    };
    let axis = committed_axis(1e9, 1e9 + 1.0, 800.0, options);

    let ticks = LinearTickGenerator.generate(&axis);
    assert!(ticks.len() <= 10_001);
}
