use indexmap::IndexMap;

use crate::core::{Axis, AxisId, PlotOffset, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::surface::{AXIS_LABEL_LAYER, TextMeasureCache, TextMeasurer};

use super::engine_config::GridStyle;

/// Committed plot-rectangle geometry for one grid setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct GridLayout {
    pub(super) offset: PlotOffset,
    pub(super) plot_width: f64,
    pub(super) plot_height: f64,
}

/// Measures tick labels, reserves per-side margins, and commits every axis's
/// pixel scale.
///
/// Label extents go through the measured-text cache so repeated redraws with
/// unchanged labels never re-measure.
pub(super) fn layout_reserved_space<M: TextMeasurer + ?Sized>(
    viewport: Viewport,
    axes: &mut IndexMap<AxisId, Axis>,
    cache: &mut TextMeasureCache,
    measurer: &M,
    grid: &GridStyle,
) -> PlotResult<GridLayout> {
    let mut offset = PlotOffset {
        left: grid.border_width,
        right: grid.border_width,
        top: grid.border_width,
        bottom: grid.border_width,
    };

    for axis in axes.values() {
        let mut max_width = 0.0f64;
        let mut max_height = 0.0f64;
        for tick in axis.ticks() {
            if tick.label.is_empty() {
                continue;
            }
            let metrics = cache.measure(AXIS_LABEL_LAYER, grid.label_font, &tick.label, measurer);
            max_width = max_width.max(metrics.width);
            max_height = max_height.max(metrics.height);
        }
        if max_width == 0.0 && max_height == 0.0 {
            continue;
        }

        let id = axis.id();
        if id.direction.is_horizontal() {
            let reserved = max_height + grid.label_margin;
            if id.is_primary() {
                offset.bottom += reserved;
            } else {
                offset.top += reserved;
            }
        } else {
            let reserved = max_width + grid.label_margin;
            if id.is_primary() {
                offset.left += reserved;
            } else {
                offset.right += reserved;
            }
        }
    }

    let plot_width = f64::from(viewport.width) - offset.left - offset.right;
    let plot_height = f64::from(viewport.height) - offset.top - offset.bottom;
    if plot_width <= 0.0 || plot_height <= 0.0 {
        return Err(PlotError::InvalidPlotArea {
            width: plot_width,
            height: plot_height,
        });
    }

    for axis in axes.values_mut() {
        let extent = if axis.direction().is_horizontal() {
            plot_width
        } else {
            plot_height
        };
        axis.compute_scale(extent)?;
    }

    Ok(GridLayout {
        offset,
        plot_width,
        plot_height,
    })
}
