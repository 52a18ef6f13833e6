use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    Axis, AxisId, AxisTransform, PlotOffset, Series, SeriesData, default_series_color,
};
use crate::error::{PlotError, PlotResult};
use crate::extensions::{HookRegistry, PluginContext};
use crate::interaction::{
    FrameLimiter, LimiterDecision, NearbyPoint, PanGesture, RangeSnapshot, SelectionRect,
    SelectionState, find_nearby,
};
use crate::surface::{Surface, TextMeasureCache};

use super::engine_config::PlotEngineConfig;
use super::grid_layout::GridLayout;

/// Data-space range selected on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub axis: AxisId,
    pub from: f64,
    pub to: f64,
}

/// Finalized drag selection mapped through every committed axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRanges {
    pub ranges: Vec<AxisRange>,
}

/// Main orchestration facade consumed by host applications.
///
/// `PlotEngine` owns the axes, series, hook lists, interaction state and the
/// measured-text cache; the host owns the surface it draws to and feeds
/// pointer events already translated into plot-local coordinates.
#[derive(Debug)]
pub struct PlotEngine<S: Surface> {
    pub(super) surface: S,
    pub(super) config: PlotEngineConfig,
    pub(super) axes: IndexMap<AxisId, Axis>,
    pub(super) series: Vec<Series>,
    pub(super) hooks: HookRegistry,
    pub(super) text_cache: TextMeasureCache,
    pub(super) selection: SelectionState,
    pub(super) pan: Option<PanGesture>,
    pub(super) limiter: FrameLimiter,
    pub(super) layout: Option<GridLayout>,
    pub(super) grid_ready: bool,
    shutdown_done: bool,
}

impl<S: Surface> PlotEngine<S> {
    /// Builds an engine with the built-in line and selection-overlay hooks.
    pub fn new(surface: S, config: PlotEngineConfig) -> PlotResult<Self> {
        Self::with_hooks(surface, config, HookRegistry::with_default_renderers())
    }

    /// Builds an engine with an explicit hook registry.
    ///
    /// `process_options` hooks run against the config first (in registration
    /// order), then the resulting config is validated; fatal configuration
    /// errors abort construction and nothing is drawn. `bind_events` hooks
    /// run once after the engine exists.
    pub fn with_hooks(
        surface: S,
        mut config: PlotEngineConfig,
        mut hooks: HookRegistry,
    ) -> PlotResult<Self> {
        for hook in &mut hooks.process_options {
            hook(&mut config);
        }
        config.validate()?;

        let mut axes = IndexMap::new();
        for (index, options) in config.x_axes.iter().enumerate() {
            let id = AxisId::x(index as u8);
            axes.insert(id, Axis::new(id, options.clone()));
        }
        for (index, options) in config.y_axes.iter().enumerate() {
            let id = AxisId::y(index as u8);
            axes.insert(id, Axis::new(id, options.clone()));
        }

        let limiter = FrameLimiter::new(config.interaction.max_update_rate_hz);
        let mut engine = Self {
            surface,
            config,
            axes,
            series: Vec::new(),
            hooks,
            text_cache: TextMeasureCache::default(),
            selection: SelectionState::default(),
            pan: None,
            limiter,
            layout: None,
            grid_ready: false,
            shutdown_done: false,
        };

        let context = engine.plugin_context();
        for hook in &mut engine.hooks.bind_events {
            hook(context);
        }
        Ok(engine)
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.config.viewport,
            series_len: self.series.len(),
            grid_ready: self.grid_ready,
        }
    }

    #[must_use]
    pub fn config(&self) -> &PlotEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Axes in registration order (x axes first, then y axes).
    #[must_use]
    pub fn axes(&self) -> &IndexMap<AxisId, Axis> {
        &self.axes
    }

    #[must_use]
    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        self.axes.get(&id)
    }

    /// Committed coordinate transform for one axis.
    pub fn transform(&self, id: AxisId) -> PlotResult<AxisTransform> {
        self.axes
            .get(&id)
            .and_then(Axis::transform)
            .ok_or_else(|| {
                PlotError::InvalidConfig(format!("no committed transform for axis {id:?}"))
            })
    }

    /// Reserved margins around the plot rectangle; zero before `setup_grid`.
    #[must_use]
    pub fn plot_offset(&self) -> PlotOffset {
        self.layout.map(|layout| layout.offset).unwrap_or_default()
    }

    #[must_use]
    pub fn plot_width(&self) -> f64 {
        self.layout.map_or(0.0, |layout| layout.plot_width)
    }

    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.layout.map_or(0.0, |layout| layout.plot_height)
    }

    #[must_use]
    pub fn text_cache_stats(&self) -> crate::surface::TextCacheStats {
        self.text_cache.stats()
    }

    /// Whether `setup_grid` has committed ranges for the current inputs.
    #[must_use]
    pub fn is_grid_ready(&self) -> bool {
        self.grid_ready
    }

    /// Replaces all series. Non-finite samples become gaps in place; indices
    /// are never shifted. The grid must be set up again before drawing.
    pub fn set_data(&mut self, data: Vec<SeriesData>) -> PlotResult<()> {
        for entry in &data {
            for id in [entry.x_axis, entry.y_axis] {
                if !self.axes.contains_key(&id) {
                    return Err(PlotError::InvalidConfig(format!(
                        "series bound to unknown axis {id:?}"
                    )));
                }
            }
        }

        self.series = data
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Series::from_data(entry, default_series_color(index)))
            .collect();
        self.grid_ready = false;
        Ok(())
    }

    /// Recomputes ranges, ticks, layout and scales from current data.
    ///
    /// Idempotent: unchanged inputs commit identical axis state.
    pub fn setup_grid(&mut self) -> PlotResult<()> {
        self.setup_grid_pass()
    }

    /// Renders one full frame to the surface.
    pub fn draw(&mut self) -> PlotResult<()> {
        self.draw_pass()
    }

    /// Applies a new surface size. Text measurements are invalidated
    /// wholesale; the grid must be set up again before drawing.
    pub fn resize(&mut self, viewport: crate::core::Viewport) -> PlotResult<()> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        self.text_cache.invalidate_all();
        self.layout = None;
        self.grid_ready = false;
        Ok(())
    }

    /// Runs the shutdown hook list once, in registration order.
    pub fn shutdown(&mut self) {
        if self.shutdown_done {
            return;
        }
        self.shutdown_done = true;
        let context = self.plugin_context();
        for hook in &mut self.hooks.shutdown {
            hook(context);
        }
    }

    /// Nearest data point within the configured hit radius, if any.
    #[must_use]
    pub fn find_nearby(&self, x: f64, y: f64) -> Option<NearbyPoint> {
        find_nearby(
            &self.series,
            &self.axes,
            x,
            y,
            self.config.interaction.hit_radius_px,
        )
    }

    fn require_grid(&self) -> PlotResult<GridLayout> {
        if !self.grid_ready {
            return Err(PlotError::InvalidConfig(
                "setup_grid must commit ranges before interaction or drawing".to_owned(),
            ));
        }
        self.layout.ok_or_else(|| {
            PlotError::InvalidConfig("plot layout is not committed".to_owned())
        })
    }

    // --- selection -------------------------------------------------------

    pub fn begin_selection(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let layout = self.require_grid()?;
        self.selection
            .begin(x, y, layout.plot_width, layout.plot_height);
        Ok(())
    }

    /// Moves the active selection corner and redraws the overlay.
    pub fn update_selection(&mut self, x: f64, y: f64) -> PlotResult<bool> {
        let layout = self.require_grid()?;
        if !self
            .selection
            .update(x, y, layout.plot_width, layout.plot_height)
        {
            return Ok(false);
        }
        self.draw_pass()?;
        Ok(true)
    }

    /// Finalizes the drag. Undersized selections clear silently to `None`.
    pub fn finish_selection(&mut self) -> PlotResult<Option<SelectionRanges>> {
        self.require_grid()?;
        let rect = self
            .selection
            .finish(self.config.interaction.selection_min_size_px);
        // The overlay disappears (or commits) either way.
        self.draw_pass()?;

        let Some(rect) = rect else {
            return Ok(None);
        };
        Ok(Some(self.selection_ranges(rect)))
    }

    pub fn clear_selection(&mut self) -> PlotResult<()> {
        self.selection.clear();
        if self.grid_ready {
            self.draw_pass()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.rect()
    }

    fn selection_ranges(&self, rect: SelectionRect) -> SelectionRanges {
        let mut ranges = Vec::new();
        for (id, axis) in &self.axes {
            let Some(transform) = axis.transform() else {
                continue;
            };
            let (p1, p2) = if id.direction.is_horizontal() {
                (rect.x1, rect.x2)
            } else {
                (rect.y1, rect.y2)
            };
            let (a, b) = (transform.c2p(p1), transform.c2p(p2));
            ranges.push(AxisRange {
                axis: *id,
                from: a.min(b),
                to: a.max(b),
            });
        }
        SelectionRanges { ranges }
    }

    // --- pan -------------------------------------------------------------

    /// Starts a pan gesture, snapshotting every pannable axis's committed
    /// range and scale.
    pub fn begin_pan(&mut self, x: f64, y: f64) -> PlotResult<()> {
        self.require_grid()?;
        let mut snapshots = Vec::new();
        for (id, axis) in &self.axes {
            if !axis.options().pannable {
                continue;
            }
            let transform = axis.transform().ok_or_else(|| {
                PlotError::InvalidConfig(format!("no committed transform for axis {id:?}"))
            })?;
            let (min, max) = transform.range();
            snapshots.push((
                *id,
                RangeSnapshot {
                    min,
                    max,
                    scale: transform.scale(),
                },
            ));
        }

        self.pan = Some(PanGesture {
            start: (x, y),
            pending: None,
            snapshots,
        });
        Ok(())
    }

    /// Moves the pan gesture. Updates faster than the configured rate are
    /// coalesced (dropped, not queued); returns whether a redraw ran.
    pub fn pan_to(&mut self, x: f64, y: f64, now_ms: f64) -> PlotResult<bool> {
        let gesture = self.pan.as_mut().ok_or_else(|| {
            PlotError::InvalidConfig("pan gesture has not been started".to_owned())
        })?;
        let decision = self.limiter.on_event(now_ms);

        match decision {
            LimiterDecision::Coalesce => {
                gesture.pending = Some((x, y));
                Ok(false)
            }
            LimiterDecision::Run => {
                gesture.pending = None;
                let start = gesture.start;
                let snapshots = gesture.snapshots.clone();
                self.apply_pan(start, &snapshots, x, y)?;
                Ok(true)
            }
        }
    }

    /// Applies a coalesced pan update once its limiter slot comes due.
    pub fn poll_pan(&mut self, now_ms: f64) -> PlotResult<bool> {
        if self.pan.is_none() || !self.limiter.poll(now_ms) {
            return Ok(false);
        }
        let Some(gesture) = self.pan.as_mut() else {
            return Ok(false);
        };
        let Some((x, y)) = gesture.pending.take() else {
            return Ok(false);
        };
        let start = gesture.start;
        let snapshots = gesture.snapshots.clone();
        self.apply_pan(start, &snapshots, x, y)?;
        Ok(true)
    }

    /// Ends the gesture; a coalesced target always gets one final synchronous
    /// update regardless of the limiter.
    pub fn end_pan(&mut self) -> PlotResult<()> {
        let Some(gesture) = self.pan.take() else {
            return Ok(());
        };
        self.limiter.finish();
        if let Some((x, y)) = gesture.pending {
            self.apply_pan(gesture.start, &gesture.snapshots, x, y)?;
        }
        Ok(())
    }

    /// Aborts the gesture; any pending coalesced update is dropped so no
    /// stale redraw can fire after the gesture ended.
    pub fn cancel_pan(&mut self) {
        self.pan = None;
        self.limiter.cancel();
    }

    fn apply_pan(
        &mut self,
        start: (f64, f64),
        snapshots: &[(AxisId, RangeSnapshot)],
        x: f64,
        y: f64,
    ) -> PlotResult<()> {
        let tolerance = self.config.interaction.pan_snap_tolerance_px;
        let mut dx = x - start.0;
        let mut dy = y - start.1;
        // Snap near-zero components so axis-aligned pans stay exact.
        if dx.abs() < tolerance {
            dx = 0.0;
        }
        if dy.abs() < tolerance {
            dy = 0.0;
        }

        for (id, snapshot) in snapshots {
            let Some(axis) = self.axes.get_mut(id) else {
                continue;
            };
            // Deltas resolve against the gesture-start snapshot, never the
            // per-frame state, so long drags cannot accumulate drift.
            let shift = if id.direction.is_horizontal() {
                -dx / snapshot.scale
            } else {
                dy / snapshot.scale
            };
            axis.options_mut().min = Some(snapshot.min + shift);
            axis.options_mut().max = Some(snapshot.max + shift);
        }

        self.setup_grid_pass()?;
        self.draw_pass()
    }

    // --- zoom ------------------------------------------------------------

    /// Zooms around a plot-local focal point; `amount > 1` zooms in. The data
    /// value under the focal pixel does not move. Axes marked non-zoomable
    /// are skipped.
    pub fn zoom(&mut self, center: (f64, f64), amount: f64) -> PlotResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom amount must be finite and > 0".to_owned(),
            ));
        }
        self.require_grid()?;

        for axis in self.axes.values_mut() {
            if !axis.options().zoomable {
                continue;
            }
            let Some(transform) = axis.transform() else {
                continue;
            };
            let pixel = if axis.direction().is_horizontal() {
                center.0
            } else {
                center.1
            };
            let focal = transform.c2p(pixel);
            let (min, max) = transform.range();
            axis.options_mut().min = Some(focal - (focal - min) / amount);
            axis.options_mut().max = Some(focal + (max - focal) / amount);
        }

        self.setup_grid_pass()?;
        self.draw_pass()
    }

    /// Zoom out by the same amount semantics as `zoom`.
    pub fn zoom_out(&mut self, center: (f64, f64), amount: f64) -> PlotResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom amount must be finite and > 0".to_owned(),
            ));
        }
        self.zoom(center, 1.0 / amount)
    }
}
