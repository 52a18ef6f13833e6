use crate::core::Series;
use crate::error::PlotResult;
use crate::render::{Color, PolylinePrimitive, RenderFrame};

use super::{DrawContext, SeriesRenderer};

/// Built-in polyline renderer for gap-aware XY series.
///
/// Each gap splits the series into separate strokes; runs shorter than two
/// points draw nothing.
#[derive(Debug, Clone, Copy)]
pub struct LineSeriesRenderer {
    pub stroke_width: f64,
}

impl Default for LineSeriesRenderer {
    fn default() -> Self {
        Self { stroke_width: 2.0 }
    }
}

fn flush_run(run: &mut Vec<(f64, f64)>, stroke_width: f64, color: Color, frame: &mut RenderFrame) {
    if run.len() >= 2 {
        frame.push_polyline(PolylinePrimitive::new(
            std::mem::take(run),
            stroke_width,
            color,
        ));
    } else {
        run.clear();
    }
}

impl SeriesRenderer for LineSeriesRenderer {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn draw_series(
        &mut self,
        context: &DrawContext,
        series: &Series,
        frame: &mut RenderFrame,
    ) -> PlotResult<()> {
        let tx = context.transform(series.x_axis())?;
        let ty = context.transform(series.y_axis())?;
        let color = series.color();

        let mut run: Vec<(f64, f64)> = Vec::new();
        for sample in series.points() {
            match sample {
                Some(point) => {
                    run.push((
                        context.to_frame_x(tx.p2c(point.x)),
                        context.to_frame_y(ty.p2c(point.y)),
                    ));
                }
                None => flush_run(&mut run, self.stroke_width, color, frame),
            }
        }
        flush_run(&mut run, self.stroke_width, color, frame);

        Ok(())
    }
}
