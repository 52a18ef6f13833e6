use tracing::{debug, warn};

use crate::core::{
    LinearTickGenerator, TickGenerator, TickGeneratorKind, TimeTickGenerator,
};
use crate::error::{PlotError, PlotResult};
use crate::extensions::DrawContext;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};
use crate::surface::{AXIS_LABEL_LAYER, Surface};

use super::engine::PlotEngine;
use super::grid_layout::{self, GridLayout};

impl<S: Surface> PlotEngine<S> {
    /// One grid setup cycle:
    /// `ComputeRanges -> GenerateTicks -> LayoutReservedSpace`.
    pub(super) fn setup_grid_pass(&mut self) -> PlotResult<()> {
        self.config.validate()?;
        let viewport = self.config.viewport;

        // ComputeRanges: aggregate data extents, then commit visible ranges.
        for axis in self.axes.values_mut() {
            axis.reset_data_extent();
        }
        for series in &self.series {
            let (x_axis, y_axis) = (series.x_axis(), series.y_axis());
            for point in series.points().iter().flatten() {
                if let Some(axis) = self.axes.get_mut(&x_axis) {
                    axis.observe(point.x);
                }
                if let Some(axis) = self.axes.get_mut(&y_axis) {
                    axis.observe(point.y);
                }
            }
        }
        for axis in self.axes.values_mut() {
            axis.set_range()?;
        }

        // GenerateTicks: a degenerate generator result degrades to an empty
        // list so the redraw cycle survives.
        for axis in self.axes.values_mut() {
            let extent_hint = if axis.direction().is_horizontal() {
                f64::from(viewport.width)
            } else {
                f64::from(viewport.height)
            };
            axis.set_pixel_hint(extent_hint);

            let ticks = match axis.options().generator {
                TickGeneratorKind::Linear => LinearTickGenerator.generate(axis),
                TickGeneratorKind::Time => TimeTickGenerator.generate(axis),
            };
            if ticks.is_empty() {
                warn!(
                    axis = ?axis.id(),
                    range = ?axis.range(),
                    "tick generator produced no ticks; axis renders without a grid"
                );
            }
            axis.set_ticks(ticks);
        }

        // LayoutReservedSpace: measure labels, reserve margins, commit scales.
        self.text_cache.begin_pass();
        let layout = grid_layout::layout_reserved_space(
            viewport,
            &mut self.axes,
            &mut self.text_cache,
            &self.surface,
            &self.config.grid,
        )?;
        self.text_cache.end_pass();

        self.layout = Some(layout);
        self.grid_ready = true;
        debug!(
            plot_width = layout.plot_width,
            plot_height = layout.plot_height,
            "grid committed"
        );
        Ok(())
    }

    /// One draw cycle: `DrawGrid -> DrawSeries[] -> DrawOverlay`.
    ///
    /// Hooks only ever run against committed, non-degenerate axis ranges; a
    /// draw before `setup_grid` is a caller bug and fails fast.
    pub(super) fn draw_pass(&mut self) -> PlotResult<()> {
        let frame = self.build_frame()?;
        self.surface.render(&frame)
    }

    /// Builds the full frame without submitting it; used by `draw_pass` and
    /// by tests that inspect geometry.
    pub fn build_frame(&mut self) -> PlotResult<RenderFrame> {
        let layout = self.committed_layout()?;
        let mut frame = RenderFrame::new(self.config.viewport);

        self.draw_grid(&mut frame, layout);

        let context = self.draw_context(layout);
        for series in &self.series {
            for hook in &mut self.hooks.draw_series {
                hook.draw_series(&context, series, &mut frame)?;
            }
        }
        for hook in &mut self.hooks.draw_overlay {
            hook.draw_overlay(&context, &mut frame)?;
        }

        Ok(frame)
    }

    fn committed_layout(&self) -> PlotResult<GridLayout> {
        if !self.grid_ready {
            return Err(PlotError::InvalidConfig(
                "setup_grid must commit ranges before draw".to_owned(),
            ));
        }
        self.layout.ok_or_else(|| {
            PlotError::InvalidConfig("plot layout is not committed".to_owned())
        })
    }

    fn draw_context(&self, layout: GridLayout) -> DrawContext {
        let transforms = self
            .axes
            .iter()
            .filter_map(|(id, axis)| axis.transform().map(|transform| (*id, transform)))
            .collect();
        DrawContext::new(
            self.config.viewport,
            layout.offset,
            layout.plot_width,
            layout.plot_height,
            self.selection.rect(),
            transforms,
        )
    }

    fn draw_grid(&mut self, frame: &mut RenderFrame, layout: GridLayout) {
        let grid = self.config.grid;
        let offset = layout.offset;
        let (plot_width, plot_height) = (layout.plot_width, layout.plot_height);

        frame.push_rect(RectPrimitive::new(
            offset.left,
            offset.top,
            plot_width,
            plot_height,
            grid.background,
        ));

        // Grid lines at tick values, clipped to the committed range.
        if grid.grid_line_width > 0.0 {
            for axis in self.axes.values() {
                let Some(transform) = axis.transform() else {
                    continue;
                };
                let (min, max) = axis.range();
                for tick in axis.ticks() {
                    if tick.value < min || tick.value > max {
                        continue;
                    }
                    let line = if axis.direction().is_horizontal() {
                        let x = offset.left + transform.p2c(tick.value);
                        LinePrimitive::new(
                            x,
                            offset.top,
                            x,
                            offset.top + plot_height,
                            grid.grid_line_width,
                            grid.grid_line_color,
                        )
                    } else {
                        let y = offset.top + transform.p2c(tick.value);
                        LinePrimitive::new(
                            offset.left,
                            y,
                            offset.left + plot_width,
                            y,
                            grid.grid_line_width,
                            grid.grid_line_color,
                        )
                    };
                    frame.push_line(line);
                }
            }
        }

        if grid.border_width > 0.0 {
            let (x1, y1) = (offset.left, offset.top);
            let (x2, y2) = (offset.left + plot_width, offset.top + plot_height);
            for (ax, ay, bx, by) in [
                (x1, y1, x2, y1),
                (x2, y1, x2, y2),
                (x2, y2, x1, y2),
                (x1, y2, x1, y1),
            ] {
                frame.push_line(LinePrimitive::new(
                    ax,
                    ay,
                    bx,
                    by,
                    grid.border_width,
                    grid.border_color,
                ));
            }
        }

        self.draw_axis_labels(frame, layout);
    }

    fn draw_axis_labels(&mut self, frame: &mut RenderFrame, layout: GridLayout) {
        let grid = self.config.grid;
        let offset = layout.offset;

        for axis in self.axes.values() {
            let Some(transform) = axis.transform() else {
                continue;
            };
            let (min, max) = axis.range();
            for tick in axis.ticks() {
                if tick.label.is_empty() || tick.value < min || tick.value > max {
                    continue;
                }
                // Placement reuses the measurement cached during layout.
                let metrics = self.text_cache.measure(
                    AXIS_LABEL_LAYER,
                    grid.label_font,
                    &tick.label,
                    &self.surface,
                );

                let id = axis.id();
                let (x, y, h_align) = if id.direction.is_horizontal() {
                    let x = offset.left + transform.p2c(tick.value);
                    let y = if id.is_primary() {
                        offset.top + layout.plot_height + grid.label_margin
                    } else {
                        offset.top - grid.label_margin - metrics.height
                    };
                    (x, y, TextHAlign::Center)
                } else {
                    let y = offset.top + transform.p2c(tick.value) - metrics.height / 2.0;
                    if id.is_primary() {
                        (offset.left - grid.label_margin, y, TextHAlign::Right)
                    } else {
                        (
                            offset.left + layout.plot_width + grid.label_margin,
                            y,
                            TextHAlign::Left,
                        )
                    }
                };

                frame.push_text(TextPrimitive::new(
                    tick.label.clone(),
                    x,
                    y,
                    grid.label_font.font_size_px,
                    grid.label_color,
                    h_align,
                ));
            }
        }
    }
}
