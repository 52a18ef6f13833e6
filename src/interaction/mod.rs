mod frame_limiter;
mod hit_test;

pub use frame_limiter::{FrameLimiter, LimiterDecision};
pub use hit_test::{NearbyPoint, find_nearby};

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Tuning for pointer-driven interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Pixel radius for nearest-point queries.
    pub hit_radius_px: f64,
    /// Selections smaller than this in either dimension are discarded.
    pub selection_min_size_px: f64,
    /// Pan deltas this close to zero are snapped to zero per component.
    pub pan_snap_tolerance_px: f64,
    /// Upper bound on pan redraw frequency; faster updates coalesce.
    pub max_update_rate_hz: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_radius_px: 10.0,
            selection_min_size_px: 5.0,
            pan_snap_tolerance_px: 2.0,
            max_update_rate_hz: 60.0,
        }
    }
}

impl InteractionConfig {
    pub fn validate(&self) -> PlotResult<()> {
        for (name, value) in [
            ("hit radius", self.hit_radius_px),
            ("selection minimum size", self.selection_min_size_px),
            ("pan snap tolerance", self.pan_snap_tolerance_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.max_update_rate_hz.is_finite() || self.max_update_rate_hz <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "max update rate must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Normalized selection rectangle in plot-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl SelectionRect {
    #[must_use]
    pub fn width(self) -> f64 {
        self.x2 - self.x1
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.y2 - self.y1
    }
}

/// Drag-selection state machine.
///
/// Both corners are clamped into the plot rectangle on every update, so a
/// drag that leaves the plot simply pins to its edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SelectionState {
    first: Option<(f64, f64)>,
    second: (f64, f64),
}

fn clamp_to_plot(x: f64, y: f64, plot_width: f64, plot_height: f64) -> (f64, f64) {
    (x.clamp(0.0, plot_width), y.clamp(0.0, plot_height))
}

impl SelectionState {
    pub fn begin(&mut self, x: f64, y: f64, plot_width: f64, plot_height: f64) {
        let corner = clamp_to_plot(x, y, plot_width, plot_height);
        self.first = Some(corner);
        self.second = corner;
    }

    /// Moves the second corner; returns whether a drag is in progress.
    pub fn update(&mut self, x: f64, y: f64, plot_width: f64, plot_height: f64) -> bool {
        if self.first.is_none() {
            return false;
        }
        self.second = clamp_to_plot(x, y, plot_width, plot_height);
        true
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.first.is_some()
    }

    /// Current corners as a normalized rectangle.
    #[must_use]
    pub fn rect(&self) -> Option<SelectionRect> {
        let (x1, y1) = self.first?;
        let (x2, y2) = self.second;
        Some(SelectionRect {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        })
    }

    /// Finalizes the drag. Selections under `min_size_px` in either dimension
    /// clear silently and yield `None`.
    pub fn finish(&mut self, min_size_px: f64) -> Option<SelectionRect> {
        let rect = self.rect()?;
        self.clear();
        if rect.width() < min_size_px || rect.height() < min_size_px {
            return None;
        }
        Some(rect)
    }

    pub fn clear(&mut self) {
        self.first = None;
    }
}

/// Per-axis range state captured when a pan gesture starts.
///
/// Pan deltas always resolve against this snapshot, never against per-frame
/// state, so a long drag cannot accumulate rounding drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSnapshot {
    pub min: f64,
    pub max: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanGesture {
    pub(crate) start: (f64, f64),
    pub(crate) pending: Option<(f64, f64)>,
    pub(crate) snapshots: Vec<(crate::core::AxisId, RangeSnapshot)>,
}
