use serde::Serialize;

use crate::core::{AxisId, PlotOffset, Tick, TickSize, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::surface::Surface;

use super::engine::PlotEngine;

/// Read-only JSON view of committed engine state, for diagnostics and host
/// tooling. This is not a persistence format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSnapshot {
    pub viewport: Viewport,
    pub plot_offset: PlotOffset,
    pub plot_width: f64,
    pub plot_height: f64,
    pub grid_ready: bool,
    pub axes: Vec<AxisSnapshot>,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSnapshot {
    pub id: AxisId,
    pub min: f64,
    pub max: f64,
    pub datamin: Option<f64>,
    pub datamax: Option<f64>,
    pub scale: Option<f64>,
    pub tick_size: Option<TickSize>,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub label: String,
    pub x_axis: AxisId,
    pub y_axis: AxisId,
    pub point_count: usize,
    pub gap_count: usize,
}

impl<S: Surface> PlotEngine<S> {
    #[must_use]
    pub fn snapshot(&self) -> PlotSnapshot {
        let axes = self
            .axes()
            .values()
            .map(|axis| {
                let (datamin, datamax) = axis.data_extent();
                AxisSnapshot {
                    id: axis.id(),
                    min: axis.min(),
                    max: axis.max(),
                    datamin,
                    datamax,
                    scale: axis.transform().map(|transform| transform.scale()),
                    tick_size: axis.tick_size(),
                    ticks: axis.ticks().to_vec(),
                }
            })
            .collect();

        let series = self
            .series()
            .iter()
            .map(|series| SeriesSnapshot {
                label: series.label().to_owned(),
                x_axis: series.x_axis(),
                y_axis: series.y_axis(),
                point_count: series.points().len(),
                gap_count: series.gap_count(),
            })
            .collect();

        PlotSnapshot {
            viewport: self.config().viewport,
            plot_offset: self.plot_offset(),
            plot_width: self.plot_width(),
            plot_height: self.plot_height(),
            grid_ready: self.is_grid_ready(),
            axes,
            series,
        }
    }

    pub fn snapshot_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
