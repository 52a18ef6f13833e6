use chrono::{DateTime, Datelike, Months, TimeDelta, Timelike, Utc};

use crate::core::axis::Axis;
use crate::core::ticks::{Tick, TickGenerator, TickSize, TimeUnit};

/// Calendar-aware tick generator over millisecond Unix timestamps (UTC).
///
/// Steps are picked from a fixed seconds-through-years table; month and year
/// steps walk with calendar arithmetic so ticks land on calendar boundaries
/// regardless of month lengths and leap years.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeTickGenerator;

const STEP_TABLE: &[(f64, TimeUnit)] = &[
    (1.0, TimeUnit::Second),
    (2.0, TimeUnit::Second),
    (5.0, TimeUnit::Second),
    (10.0, TimeUnit::Second),
    (30.0, TimeUnit::Second),
    (1.0, TimeUnit::Minute),
    (2.0, TimeUnit::Minute),
    (5.0, TimeUnit::Minute),
    (10.0, TimeUnit::Minute),
    (30.0, TimeUnit::Minute),
    (1.0, TimeUnit::Hour),
    (2.0, TimeUnit::Hour),
    (4.0, TimeUnit::Hour),
    (8.0, TimeUnit::Hour),
    (12.0, TimeUnit::Hour),
    (1.0, TimeUnit::Day),
    (2.0, TimeUnit::Day),
    (3.0, TimeUnit::Day),
    (0.25, TimeUnit::Month),
    (0.5, TimeUnit::Month),
    (1.0, TimeUnit::Month),
    (2.0, TimeUnit::Month),
    (3.0, TimeUnit::Month),
    (6.0, TimeUnit::Month),
    (1.0, TimeUnit::Year),
];

/// Hard cap on tick walking; a correct step never comes close.
const MAX_TICK_STEPS: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct TimeStep {
    magnitude: f64,
    unit: TimeUnit,
}

impl TimeStep {
    fn millis(self) -> f64 {
        self.magnitude * self.unit.millis()
    }
}

impl TimeTickGenerator {
    fn resolve_step(axis: &Axis) -> TimeStep {
        let options = axis.options();
        if let Some(TickSize::Time(magnitude, unit)) = options.tick_size {
            return TimeStep { magnitude, unit };
        }

        let (min, max) = axis.range();
        let floor_ms = options.min_tick_size.map_or(0.0, TickSize::in_units);
        choose_step(max - min, axis.tick_target_count(), floor_ms)
    }
}

/// Largest table entry whose duration is at most the midpoint to the next
/// entry; whole-year spans re-derive the magnitude on a log10 scale since
/// there is no coarser calendar unit to fall back on.
fn choose_step(span: f64, target: usize, floor_ms: f64) -> TimeStep {
    let delta = span / target.max(1) as f64;

    let mut chosen = None;
    for (index, &(magnitude, unit)) in STEP_TABLE.iter().enumerate() {
        let current = magnitude * unit.millis();
        if current < floor_ms {
            continue;
        }
        let next = STEP_TABLE
            .get(index + 1)
            .map_or(f64::INFINITY, |&(m, u)| m * u.millis());
        if delta < (current + next) / 2.0 {
            chosen = Some(TimeStep { magnitude, unit });
            break;
        }
    }

    let mut step = chosen.unwrap_or(TimeStep {
        magnitude: 1.0,
        unit: TimeUnit::Year,
    });

    if step.unit == TimeUnit::Year {
        let years = delta / TimeUnit::Year.millis();
        if years > 1.0 {
            let magnitude = 10f64.powf(years.log10().floor());
            let norm = years / magnitude;
            let multiplier = if norm < 1.5 {
                1.0
            } else if norm < 3.0 {
                2.0
            } else if norm < 7.5 {
                5.0
            } else {
                10.0
            };
            step.magnitude = (multiplier * magnitude).max(1.0);
        }
        let floor_years = floor_ms / TimeUnit::Year.millis();
        if step.magnitude < floor_years {
            step.magnitude = floor_years.ceil();
        }
    }

    step
}

/// Aligns the walk start on a calendar boundary at or before `min_ms`, with
/// all components finer than the step unit zeroed.
fn floor_to_step(min_ms: f64, step: TimeStep) -> Option<DateTime<Utc>> {
    if !min_ms.is_finite() {
        return None;
    }
    let date = DateTime::from_timestamp_millis(min_ms.floor() as i64)?.with_nanosecond(0)?;

    match step.unit {
        TimeUnit::Second => {
            let magnitude = (step.magnitude.max(1.0) as u32).min(59);
            date.with_second(date.second() - date.second() % magnitude)
        }
        TimeUnit::Minute => {
            let magnitude = (step.magnitude.max(1.0) as u32).min(59);
            date.with_second(0)?
                .with_minute(date.minute() - date.minute() % magnitude)
        }
        TimeUnit::Hour => {
            let magnitude = (step.magnitude.max(1.0) as u32).min(23);
            date.with_second(0)?
                .with_minute(0)?
                .with_hour(date.hour() - date.hour() % magnitude)
        }
        TimeUnit::Day => date.with_second(0)?.with_minute(0)?.with_hour(0),
        TimeUnit::Month => {
            let date = date.with_second(0)?.with_minute(0)?.with_hour(0)?;
            if step.magnitude >= 1.0 {
                let magnitude = step.magnitude as u32;
                date.with_day(1)?
                    .with_month0(date.month0() - date.month0() % magnitude)
            } else {
                // Fractional month steps keep the current day and walk in
                // whole days instead.
                Some(date)
            }
        }
        TimeUnit::Year => {
            let date = date
                .with_second(0)?
                .with_minute(0)?
                .with_hour(0)?
                .with_day(1)?
                .with_month0(0)?;
            let magnitude = step.magnitude.max(1.0) as i32;
            date.with_year(date.year().div_euclid(magnitude) * magnitude)
        }
    }
}

fn advance(cursor: DateTime<Utc>, step: TimeStep) -> Option<DateTime<Utc>> {
    match step.unit {
        TimeUnit::Month if step.magnitude < 1.0 => {
            let month_days = days_in_month(cursor.year(), cursor.month());
            let days = (step.magnitude * f64::from(month_days)).round().max(1.0) as i64;
            cursor.checked_add_signed(TimeDelta::days(days))
        }
        TimeUnit::Month => cursor.checked_add_months(Months::new(step.magnitude as u32)),
        TimeUnit::Year => cursor.with_year(cursor.year() + step.magnitude as i32),
        _ => {
            let next = cursor.timestamp_millis() as f64 + step.millis();
            DateTime::from_timestamp_millis(next.round() as i64)
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
    }
}

fn format_label(value_ms: f64, span: f64, step: TimeStep, time_format: Option<&str>) -> String {
    let Some(date) = DateTime::from_timestamp_millis(value_ms.round() as i64) else {
        return format!("{value_ms}");
    };
    if let Some(pattern) = time_format {
        return date.format(pattern).to_string();
    }

    let minute = TimeUnit::Minute.millis();
    let day = TimeUnit::Day.millis();
    let month = TimeUnit::Month.millis();
    let year = TimeUnit::Year.millis();

    let step_ms = step.millis();
    let pattern = if step_ms < minute {
        "%H:%M:%S"
    } else if step_ms < day {
        if span > 2.0 * day { "%b %d %H:%M" } else { "%H:%M" }
    } else if step_ms < month {
        "%b %d"
    } else if step_ms < year {
        if span > year { "%b %Y" } else { "%b" }
    } else {
        "%Y"
    };
    date.format(pattern).to_string()
}

impl TickGenerator for TimeTickGenerator {
    fn generate(&self, axis: &Axis) -> Vec<Tick> {
        let (min, max) = axis.range();
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            return Vec::new();
        }

        let step = Self::resolve_step(axis);
        if !step.magnitude.is_finite() || step.magnitude <= 0.0 {
            return Vec::new();
        }
        let Some(start) = floor_to_step(min, step) else {
            return Vec::new();
        };
        let time_format = axis.options().time_format.as_deref();

        let mut ticks = Vec::new();
        let mut cursor = start;
        let mut prev = f64::NAN;
        for _ in 0..MAX_TICK_STEPS {
            let value = cursor.timestamp_millis() as f64;
            if value == prev {
                break;
            }
            prev = value;
            if value > max {
                break;
            }
            if value >= min {
                ticks.push(Tick::new(value, format_label(value, span, step, time_format)));
            }
            cursor = match advance(cursor, step) {
                Some(next) => next,
                None => break,
            };
        }

        ticks
    }

    fn format(&self, value: f64, axis: &Axis) -> String {
        let (min, max) = axis.range();
        format_label(
            value,
            max - min,
            Self::resolve_step(axis),
            axis.options().time_format.as_deref(),
        )
    }
}
