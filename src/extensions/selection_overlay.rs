use crate::error::PlotResult;
use crate::render::{Color, LinePrimitive, RectPrimitive, RenderFrame};

use super::{DrawContext, OverlayRenderer};

/// Built-in overlay drawing the active drag-selection rectangle.
#[derive(Debug, Clone, Copy)]
pub struct SelectionOverlayRenderer {
    pub fill: Color,
    pub border: Color,
    pub border_width: f64,
}

impl Default for SelectionOverlayRenderer {
    fn default() -> Self {
        let accent = Color::rgb(0.91, 0.81, 0.67);
        Self {
            fill: accent.with_alpha(0.4),
            border: accent,
            border_width: 1.0,
        }
    }
}

impl OverlayRenderer for SelectionOverlayRenderer {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn draw_overlay(&mut self, context: &DrawContext, frame: &mut RenderFrame) -> PlotResult<()> {
        let Some(rect) = context.selection else {
            return Ok(());
        };

        let x = context.to_frame_x(rect.x1);
        let y = context.to_frame_y(rect.y1);
        let width = rect.width();
        let height = rect.height();
        frame.push_rect(RectPrimitive::new(x, y, width, height, self.fill));

        let corners = [
            (x, y, x + width, y),
            (x + width, y, x + width, y + height),
            (x + width, y + height, x, y + height),
            (x, y + height, x, y),
        ];
        for (x1, y1, x2, y2) in corners {
            frame.push_line(LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                self.border_width,
                self.border,
            ));
        }

        Ok(())
    }
}
