mod text_cache;

pub use text_cache::{AXIS_LABEL_LAYER, TextCacheStats, TextMeasureCache};

use serde::{Deserialize, Serialize};

use crate::render::Renderer;

/// Style inputs that affect text measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size_px: f64,
    #[serde(default)]
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            bold: false,
        }
    }
}

impl TextStyle {
    /// Quantized hashable form used as a cache key component.
    #[must_use]
    pub(crate) fn cache_key(self) -> TextStyleKey {
        let millis = (self.font_size_px * 1_000.0).round();
        let font_size_millipx = if millis.is_finite() {
            millis.clamp(i64::MIN as f64, i64::MAX as f64) as i64
        } else {
            0
        };
        TextStyleKey {
            font_size_millipx,
            bold: self.bold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TextStyleKey {
    font_size_millipx: i64,
    bold: bool,
}

/// Measured extent of one text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measurement primitive supplied by the host surface.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str, style: TextStyle) -> TextMetrics;
}

/// A drawing target: a pixel-addressable renderer plus text measurement.
pub trait Surface: Renderer + TextMeasurer {}

impl<T: Renderer + TextMeasurer> Surface for T {}
