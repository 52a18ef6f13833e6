use serde::{Deserialize, Serialize};

use crate::core::ticks::{Tick, TickSize, tick_step_hint};
use crate::core::types::{AxisDirection, AxisId};
use crate::error::{PlotError, PlotResult};

/// Which tick strategy an axis uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TickGeneratorKind {
    /// "Nice number" decimal steps.
    #[default]
    Linear,
    /// Calendar-aware steps over millisecond timestamps.
    Time,
}

/// Per-axis user configuration.
///
/// Unset `min`/`max` fall back to the observed data extent; `autoscale_margin`
/// only expands bounds the user did not fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub autoscale_margin: Option<f64>,
    /// Explicit target tick count override.
    #[serde(default)]
    pub ticks: Option<usize>,
    #[serde(default)]
    pub tick_size: Option<TickSize>,
    #[serde(default)]
    pub min_tick_size: Option<TickSize>,
    #[serde(default)]
    pub tick_decimals: Option<u8>,
    #[serde(default)]
    pub generator: TickGeneratorKind,
    /// strftime-style override for time-axis labels.
    #[serde(default)]
    pub time_format: Option<String>,
    #[serde(default = "default_true")]
    pub zoomable: bool,
    #[serde(default = "default_true")]
    pub pannable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            autoscale_margin: None,
            ticks: None,
            tick_size: None,
            min_tick_size: None,
            tick_decimals: None,
            generator: TickGeneratorKind::default(),
            time_format: None,
            zoomable: true,
            pannable: true,
        }
    }
}

impl AxisOptions {
    /// Convenience constructor for a calendar-time axis.
    #[must_use]
    pub fn time() -> Self {
        Self {
            generator: TickGeneratorKind::Time,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        for (name, bound) in [("min", self.min), ("max", self.max)] {
            if let Some(value) = bound {
                if !value.is_finite() {
                    return Err(PlotError::InvalidConfig(format!(
                        "axis {name} override must be finite"
                    )));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(PlotError::InvalidConfig(
                    "axis min override must not exceed max override".to_owned(),
                ));
            }
        }

        if let Some(margin) = self.autoscale_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(PlotError::InvalidConfig(
                    "autoscale margin must be finite and >= 0".to_owned(),
                ));
            }
        }

        if let Some(ticks) = self.ticks {
            if ticks == 0 {
                return Err(PlotError::InvalidConfig(
                    "explicit tick count must be > 0".to_owned(),
                ));
            }
        }

        for (name, size) in [
            ("tick size", self.tick_size),
            ("minimum tick size", self.min_tick_size),
        ] {
            let Some(size) = size else { continue };
            size.validate(name)?;
            match (self.generator, size) {
                (TickGeneratorKind::Linear, TickSize::Time(..)) => {
                    return Err(PlotError::InvalidConfig(format!(
                        "linear axis {name} must be a plain unit step"
                    )));
                }
                (TickGeneratorKind::Time, TickSize::Units(..)) => {
                    return Err(PlotError::InvalidConfig(format!(
                        "time axis {name} must carry a calendar unit"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Committed affine mapping between data space and pixel space.
///
/// Copies of this value stay valid for the duration of one redraw cycle, so
/// collaborators can hold it without borrowing the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTransform {
    direction: AxisDirection,
    min: f64,
    max: f64,
    scale: f64,
}

impl AxisTransform {
    #[must_use]
    pub fn direction(self) -> AxisDirection {
        self.direction
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn scale(self) -> f64 {
        self.scale
    }

    /// Maps a data value to a plot-local pixel coordinate.
    #[must_use]
    pub fn p2c(self, value: f64) -> f64 {
        match self.direction {
            AxisDirection::Horizontal => (value - self.min) * self.scale,
            AxisDirection::Vertical => (self.max - value) * self.scale,
        }
    }

    /// Maps a plot-local pixel coordinate back to a data value.
    #[must_use]
    pub fn c2p(self, pixel: f64) -> f64 {
        match self.direction {
            AxisDirection::Horizontal => self.min + pixel / self.scale,
            AxisDirection::Vertical => self.max - pixel / self.scale,
        }
    }
}

/// One axis: visible range, observed data extent, committed pixel transform
/// and the current tick list.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    id: AxisId,
    options: AxisOptions,
    datamin: Option<f64>,
    datamax: Option<f64>,
    min: f64,
    max: f64,
    pixel_hint: f64,
    transform: Option<AxisTransform>,
    ticks: Vec<Tick>,
}

impl Axis {
    #[must_use]
    pub fn new(id: AxisId, options: AxisOptions) -> Self {
        Self {
            id,
            options,
            datamin: None,
            datamax: None,
            min: 0.0,
            max: 1.0,
            pixel_hint: 0.0,
            transform: None,
            ticks: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn direction(&self) -> AxisDirection {
        self.id.direction
    }

    #[must_use]
    pub fn options(&self) -> &AxisOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut AxisOptions {
        &mut self.options
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn data_extent(&self) -> (Option<f64>, Option<f64>) {
        (self.datamin, self.datamax)
    }

    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Committed tick step: the configured override, else the spacing observed
    /// in the current tick list.
    #[must_use]
    pub fn tick_size(&self) -> Option<TickSize> {
        if let Some(size) = self.options.tick_size {
            return Some(size);
        }
        let hint = tick_step_hint(&self.ticks);
        (hint > 0.0).then_some(TickSize::Units(hint))
    }

    /// Committed transform, available only after `compute_scale`.
    #[must_use]
    pub fn transform(&self) -> Option<AxisTransform> {
        self.transform
    }

    pub fn reset_data_extent(&mut self) {
        self.datamin = None;
        self.datamax = None;
    }

    /// Folds one observed data value into `datamin`/`datamax`.
    pub fn observe(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.datamin = Some(self.datamin.map_or(value, |current| current.min(value)));
        self.datamax = Some(self.datamax.map_or(value, |current| current.max(value)));
    }

    /// Records the pixel length available for tick-density estimation.
    pub fn set_pixel_hint(&mut self, pixels: f64) {
        self.pixel_hint = if pixels.is_finite() { pixels.max(0.0) } else { 0.0 };
    }

    /// Target tick count: explicit override, else one tick per ~100 px
    /// horizontally / ~60 px vertically.
    #[must_use]
    pub fn tick_target_count(&self) -> usize {
        if let Some(count) = self.options.ticks {
            return count.max(1);
        }
        let spacing = if self.direction().is_horizontal() {
            100.0
        } else {
            60.0
        };
        let raw = (self.pixel_hint / spacing).round() as usize;
        raw.clamp(2, 64)
    }

    /// Commits the visible range from user overrides and the observed extent.
    ///
    /// A zero span is widened symmetrically (by 1.0 when centered at zero,
    /// else by 1% of the value); the autoscale margin expands only bounds the
    /// user did not fix, clamping through zero when the data never crosses it.
    pub fn set_range(&mut self) -> PlotResult<()> {
        self.options.validate()?;

        let user_min = self.options.min;
        let user_max = self.options.max;
        let mut min = user_min.or(self.datamin).unwrap_or(0.0);
        let mut max = user_max.or(self.datamax).unwrap_or(1.0);

        if min > max {
            std::mem::swap(&mut min, &mut max);
        }

        let span = max - min;
        if span == 0.0 {
            let widen = if max == 0.0 { 1.0 } else { 0.01 * max.abs() };
            if user_min.is_none() {
                min -= widen;
            }
            // Always widen max when min was fixed, so the span is never zero.
            if user_max.is_none() || user_min.is_some() {
                max += widen;
            }
        } else if let Some(margin) = self.options.autoscale_margin {
            if user_min.is_none() {
                min -= span * margin;
                if min < 0.0 && self.datamin.is_some_and(|dm| dm >= 0.0) {
                    min = 0.0;
                }
            }
            if user_max.is_none() {
                max += span * margin;
                if max > 0.0 && self.datamax.is_some_and(|dm| dm <= 0.0) {
                    max = 0.0;
                }
            }
        }

        self.min = min;
        self.max = max;
        // Any range change invalidates the committed transform until the
        // pipeline recomputes the scale.
        self.transform = None;
        Ok(())
    }

    /// Commits `scale = pixel_extent / span` and the coordinate transform.
    ///
    /// A zero or negative pixel extent indicates an unusable surface size and
    /// is fatal.
    pub fn compute_scale(&mut self, pixel_extent: f64) -> PlotResult<()> {
        if !pixel_extent.is_finite() || pixel_extent <= 0.0 {
            return Err(PlotError::InvalidPlotArea {
                width: if self.direction().is_horizontal() {
                    pixel_extent
                } else {
                    0.0
                },
                height: if self.direction().is_horizontal() {
                    0.0
                } else {
                    pixel_extent
                },
            });
        }

        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "axis range must be committed before computing scale".to_owned(),
            ));
        }

        self.transform = Some(AxisTransform {
            direction: self.direction(),
            min: self.min,
            max: self.max,
            scale: pixel_extent / span,
        });
        Ok(())
    }

    /// Replaces the committed tick list wholesale.
    pub fn set_ticks(&mut self, ticks: Vec<Tick>) {
        self.ticks = ticks;
    }
}
