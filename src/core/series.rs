use serde::{Deserialize, Serialize};

use crate::core::types::{AxisId, DataPoint};
use crate::render::Color;

/// Raw series input as supplied by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// `None` entries are gaps; non-finite coordinates become gaps too.
    pub points: Vec<Option<(f64, f64)>>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_x_axis")]
    pub x_axis: AxisId,
    #[serde(default = "default_y_axis")]
    pub y_axis: AxisId,
    /// Opaque options interpreted by series renderers, not by the core.
    #[serde(default)]
    pub options: serde_json::Value,
}

impl SeriesData {
    #[must_use]
    pub fn from_points(points: Vec<Option<(f64, f64)>>) -> Self {
        Self {
            points,
            label: String::new(),
            color: None,
            x_axis: AxisId::X1,
            y_axis: AxisId::Y1,
            options: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_axes(mut self, x_axis: AxisId, y_axis: AxisId) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

fn default_x_axis() -> AxisId {
    AxisId::X1
}

fn default_y_axis() -> AxisId {
    AxisId::Y1
}

/// Parsed series owned by the engine.
///
/// Point indices always align with the input data: a bad sample becomes a gap
/// in place, it is never dropped, so hit-test results index the caller's
/// original data.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<Option<DataPoint>>,
    label: String,
    color: Color,
    x_axis: AxisId,
    y_axis: AxisId,
    options: serde_json::Value,
}

impl Series {
    #[must_use]
    pub fn from_data(data: SeriesData, fallback_color: Color) -> Self {
        let points = data
            .points
            .into_iter()
            .map(|sample| {
                let (x, y) = sample?;
                if !x.is_finite() || !y.is_finite() {
                    return None;
                }
                Some(DataPoint::new(x, y))
            })
            .collect();

        Self {
            points,
            label: data.label,
            color: data.color.unwrap_or(fallback_color),
            x_axis: data.x_axis,
            y_axis: data.y_axis,
            options: data.options,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Option<DataPoint>] {
        &self.points
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn x_axis(&self) -> AxisId {
        self.x_axis
    }

    #[must_use]
    pub fn y_axis(&self) -> AxisId {
        self.y_axis
    }

    #[must_use]
    pub fn options(&self) -> &serde_json::Value {
        &self.options
    }

    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.points.iter().filter(|sample| sample.is_none()).count()
    }
}

/// Default palette cycled over series without an explicit color.
const SERIES_PALETTE: [Color; 5] = [
    Color::rgb(0.93, 0.76, 0.25),
    Color::rgb(0.69, 0.85, 0.97),
    Color::rgb(0.80, 0.29, 0.29),
    Color::rgb(0.30, 0.65, 0.30),
    Color::rgb(0.58, 0.25, 0.93),
];

#[must_use]
pub fn default_series_color(index: usize) -> Color {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}
