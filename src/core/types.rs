use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64};
use crate::error::PlotResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> PlotResult<Self> {
        Ok(Self {
            x: datetime_to_unix_millis(time),
            y: decimal_to_f64(value, "value")?,
        })
    }
}

/// Margins reserved around the plot rectangle for axis labels and padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotOffset {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Axis orientation. Vertical axes map data to screen-down pixels, so their
/// pixel mapping is inverted relative to horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    Horizontal,
    Vertical,
}

impl AxisDirection {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Stable identifier for one axis instance.
///
/// `index` 0 is the primary axis of a direction (bottom/left); higher indices
/// are secondary axes laid out on the opposite side (top/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisId {
    pub direction: AxisDirection,
    pub index: u8,
}

impl AxisId {
    pub const X1: Self = Self::x(0);
    pub const X2: Self = Self::x(1);
    pub const Y1: Self = Self::y(0);
    pub const Y2: Self = Self::y(1);

    #[must_use]
    pub const fn x(index: u8) -> Self {
        Self {
            direction: AxisDirection::Horizontal,
            index,
        }
    }

    #[must_use]
    pub const fn y(index: u8) -> Self {
        Self {
            direction: AxisDirection::Vertical,
            index,
        }
    }

    #[must_use]
    pub fn is_primary(self) -> bool {
        self.index == 0
    }
}
