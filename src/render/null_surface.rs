use crate::error::PlotResult;
use crate::render::{RenderFrame, Renderer};
use crate::surface::{TextMeasurer, TextMetrics, TextStyle};

/// No-op surface used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced, and it measures text with a
/// deterministic per-character approximation.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub render_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullSurface {
    fn render(&mut self, frame: &RenderFrame) -> PlotResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

impl TextMeasurer for NullSurface {
    fn measure_text(&self, text: &str, style: TextStyle) -> TextMetrics {
        let per_char = if style.bold { 0.65 } else { 0.6 };
        TextMetrics {
            width: text.chars().count() as f64 * style.font_size_px * per_char,
            height: style.font_size_px * 1.2,
        }
    }
}
