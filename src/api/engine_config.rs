use serde::{Deserialize, Serialize};

use crate::core::{AxisOptions, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::InteractionConfig;
use crate::render::Color;
use crate::surface::TextStyle;

/// Visual styling for the grid, border and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    pub background: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub border_color: Color,
    pub border_width: f64,
    pub label_color: Color,
    pub label_font: TextStyle,
    /// Gap between the plot edge and tick labels.
    pub label_margin: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.15),
            grid_line_width: 1.0,
            border_color: Color::rgba(0.0, 0.0, 0.0, 0.4),
            border_width: 1.0,
            label_color: Color::rgb(0.33, 0.33, 0.33),
            label_font: TextStyle::default(),
            label_margin: 5.0,
        }
    }
}

impl GridStyle {
    pub fn validate(&self) -> PlotResult<()> {
        self.background
            .validate()
            .and_then(|()| self.grid_line_color.validate())
            .and_then(|()| self.border_color.validate())
            .and_then(|()| self.label_color.validate())
            .map_err(|err| PlotError::InvalidConfig(err.to_string()))?;

        for (name, value) in [
            ("grid line width", self.grid_line_width),
            ("border width", self.border_width),
            ("label margin", self.label_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.label_font.font_size_px.is_finite() || self.label_font.font_size_px <= 0.0 {
            return Err(PlotError::InvalidConfig(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load plot setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotEngineConfig {
    pub viewport: Viewport,
    /// Horizontal axes; index 0 is the primary (bottom) axis.
    pub x_axes: Vec<AxisOptions>,
    /// Vertical axes; index 0 is the primary (left) axis.
    pub y_axes: Vec<AxisOptions>,
    #[serde(default)]
    pub grid: GridStyle,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

impl PlotEngineConfig {
    /// Creates a minimal config with one default axis per direction.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            x_axes: vec![AxisOptions::default()],
            y_axes: vec![AxisOptions::default()],
            grid: GridStyle::default(),
            interaction: InteractionConfig::default(),
        }
    }

    /// Replaces the primary horizontal axis options.
    #[must_use]
    pub fn with_x_axis(mut self, options: AxisOptions) -> Self {
        self.x_axes[0] = options;
        self
    }

    /// Replaces the primary vertical axis options.
    #[must_use]
    pub fn with_y_axis(mut self, options: AxisOptions) -> Self {
        self.y_axes[0] = options;
        self
    }

    /// Appends a secondary horizontal axis (laid out on the top edge).
    #[must_use]
    pub fn add_x_axis(mut self, options: AxisOptions) -> Self {
        self.x_axes.push(options);
        self
    }

    /// Appends a secondary vertical axis (laid out on the right edge).
    #[must_use]
    pub fn add_y_axis(mut self, options: AxisOptions) -> Self {
        self.y_axes.push(options);
        self
    }

    #[must_use]
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = grid;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionConfig) -> Self {
        self.interaction = interaction;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for (direction, axes) in [("x", &self.x_axes), ("y", &self.y_axes)] {
            if axes.is_empty() {
                return Err(PlotError::InvalidConfig(format!(
                    "at least one {direction} axis is required"
                )));
            }
            if axes.len() > usize::from(u8::MAX) {
                return Err(PlotError::InvalidConfig(format!(
                    "too many {direction} axes"
                )));
            }
            for options in axes {
                options.validate()?;
            }
        }

        self.grid.validate()?;
        self.interaction.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))
    }
}
