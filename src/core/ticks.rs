use serde::{Deserialize, Serialize};

use crate::core::axis::Axis;
use crate::error::{PlotError, PlotResult};

/// Calendar unit used by time-axis tick steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    /// Nominal duration in milliseconds (months and years are calendar
    /// averages, used only for step selection and format thresholds).
    #[must_use]
    pub fn millis(self) -> f64 {
        const SECOND: f64 = 1_000.0;
        const MINUTE: f64 = 60.0 * SECOND;
        const HOUR: f64 = 60.0 * MINUTE;
        const DAY: f64 = 24.0 * HOUR;
        match self {
            Self::Second => SECOND,
            Self::Minute => MINUTE,
            Self::Hour => HOUR,
            Self::Day => DAY,
            Self::Month => 30.0 * DAY,
            Self::Year => 365.2425 * DAY,
        }
    }
}

/// Tick step override: a plain unit step, or a calendar step for time axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TickSize {
    Units(f64),
    Time(f64, TimeUnit),
}

impl TickSize {
    /// Approximate step size in axis units (milliseconds for time axes).
    #[must_use]
    pub fn in_units(self) -> f64 {
        match self {
            Self::Units(step) => step,
            Self::Time(magnitude, unit) => magnitude * unit.millis(),
        }
    }

    pub fn validate(self, name: &str) -> PlotResult<()> {
        let magnitude = match self {
            Self::Units(step) => step,
            Self::Time(magnitude, _) => magnitude,
        };
        if !magnitude.is_finite() || magnitude <= 0.0 {
            return Err(PlotError::InvalidConfig(format!(
                "{name} must be finite and > 0"
            )));
        }
        Ok(())
    }
}

/// One labeled reference value on an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Pluggable tick strategy.
///
/// `generate` must be a pure function of the axis's committed range and
/// options so regenerating for an unchanged range yields an identical list.
pub trait TickGenerator {
    fn generate(&self, axis: &Axis) -> Vec<Tick>;
    fn format(&self, value: f64, axis: &Axis) -> String;
}

/// Smallest spacing observed between consecutive committed ticks.
#[must_use]
pub fn tick_step_hint(ticks: &[Tick]) -> f64 {
    if ticks.len() <= 1 {
        return 0.0;
    }

    let mut best = f64::INFINITY;
    for pair in ticks.windows(2) {
        let step = (pair[1].value - pair[0].value).abs();
        if step.is_finite() && step > 0.0 {
            best = best.min(step);
        }
    }

    if best.is_finite() { best } else { 0.0 }
}

/// Label precision implied by a step size (e.g. step 0.25 -> 2 decimals).
#[must_use]
pub fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let text = format!("{:.12}", step.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len().clamp(0, 12)
}

/// "Nice number" decimal tick generator.
///
/// Steps are chosen from {1, 2, 2.5, 5, 10} x 10^k; the 2.5 multiplier costs
/// one extra decimal place and is skipped when `tick_decimals` forbids it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTickGenerator;

struct LinearStep {
    step: f64,
    decimals: usize,
}

impl LinearTickGenerator {
    fn plan(axis: &Axis) -> Option<LinearStep> {
        let (min, max) = axis.range();
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }

        let options = axis.options();
        if let Some(TickSize::Units(step)) = options.tick_size {
            let decimals = options
                .tick_decimals
                .map_or_else(|| precision_from_step(step), usize::from);
            return Some(LinearStep { step, decimals });
        }

        let target = axis.tick_target_count().max(1);
        let delta = span / target as f64;
        let mut step = nice_step(delta, options.tick_decimals);
        if let Some(TickSize::Units(floor)) = options.min_tick_size {
            if step.step < floor {
                step = LinearStep {
                    step: floor,
                    decimals: precision_from_step(floor),
                };
            }
        }
        Some(step)
    }
}

fn nice_step(delta: f64, tick_decimals: Option<u8>) -> LinearStep {
    let mut dec = -(delta.log10().floor()) as i32;
    if let Some(max_dec) = tick_decimals {
        let max_dec = i32::from(max_dec);
        if dec > max_dec {
            dec = max_dec;
        }
    }

    let magnitude = 10f64.powi(-dec);
    let norm = delta / magnitude;

    // Smallest of {1, 2, 2.5, 5, 10} that is >= the normalized delta; 2.5
    // needs an extra decimal place to label exactly.
    let allows_extra_decimal = tick_decimals.is_none_or(|max_dec| dec + 1 <= i32::from(max_dec));
    let multiplier = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 && allows_extra_decimal {
        dec += 1;
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };

    LinearStep {
        step: multiplier * magnitude,
        decimals: dec.max(0) as usize,
    }
}

impl TickGenerator for LinearTickGenerator {
    fn generate(&self, axis: &Axis) -> Vec<Tick> {
        let Some(plan) = Self::plan(axis) else {
            return Vec::new();
        };
        let (min, max) = axis.range();
        let step = plan.step;
        let epsilon = step * 1e-9;

        let start = (min / step).floor() * step;
        let mut ticks = Vec::new();
        let mut prev = f64::NAN;
        let mut index = 0usize;
        // Runaway guard for absurd explicit step overrides.
        while index <= 10_000 {
            // `start + i * step` instead of repeated addition: a tiny step
            // added to a large start would otherwise stall without advancing.
            let value = start + index as f64 * step;
            if value == prev {
                break;
            }
            prev = value;
            if value > max + epsilon {
                break;
            }
            if value >= min - epsilon {
                ticks.push(Tick::new(value, format_decimal(value, plan.decimals)));
            }
            index += 1;
        }

        ticks
    }

    fn format(&self, value: f64, axis: &Axis) -> String {
        let decimals = Self::plan(axis).map_or(2, |plan| plan.decimals);
        format_decimal(value, decimals)
    }
}

fn format_decimal(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    // Avoid the "-0" label a signed zero would otherwise produce.
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return text.trim_start_matches('-').to_owned();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{LinearTickGenerator, TickGenerator, precision_from_step};
    use crate::core::axis::{Axis, AxisOptions};
    use crate::core::types::AxisId;

    fn axis_with_range(min: f64, max: f64, pixel_hint: f64) -> Axis {
        let mut axis = Axis::new(AxisId::X1, AxisOptions::default());
        axis.observe(min);
        axis.observe(max);
        axis.set_pixel_hint(pixel_hint);
        axis.set_range().expect("range");
        axis
    }

    #[test]
    fn linear_ticks_land_on_step_multiples() {
        let axis = axis_with_range(0.0, 10.0, 1000.0);
        let ticks = LinearTickGenerator.generate(&axis);

        assert!(!ticks.is_empty());
        assert!((ticks[0].value - 0.0).abs() <= 1e-9);
        let step = ticks[1].value - ticks[0].value;
        for pair in ticks.windows(2) {
            assert!(((pair[1].value - pair[0].value) - step).abs() <= 1e-9);
        }
    }

    #[test]
    fn tick_decimals_constraint_blocks_half_steps() {
        let mut axis = Axis::new(
            AxisId::X1,
            AxisOptions {
                ticks: Some(4),
                tick_decimals: Some(0),
                ..AxisOptions::default()
            },
        );
        axis.observe(0.0);
        axis.observe(9.0);
        axis.set_range().expect("range");

        let ticks = LinearTickGenerator.generate(&axis);
        for tick in &ticks {
            assert_eq!(tick.value.fract(), 0.0, "tick {} not integral", tick.value);
        }
    }

    #[test]
    fn precision_from_step_matches_fraction_digits() {
        assert_eq!(precision_from_step(1.0), 0);
        assert_eq!(precision_from_step(0.5), 1);
        assert_eq!(precision_from_step(0.25), 2);
        assert_eq!(precision_from_step(2.5), 1);
    }
}
