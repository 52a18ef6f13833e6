use indexmap::IndexMap;

use crate::api::PlotEngineConfig;
use crate::core::{AxisId, AxisTransform, PlotOffset, Series, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::SelectionRect;
use crate::render::RenderFrame;

use super::line_renderer::LineSeriesRenderer;
use super::selection_overlay::SelectionOverlayRenderer;

/// Read-only geometry snapshot handed to draw hooks.
///
/// Transforms are committed copies: a hook may keep one for the duration of
/// the draw call without borrowing the engine. All primitives are emitted in
/// surface coordinates; `to_frame_x`/`to_frame_y` shift plot-local pixels by
/// the reserved offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawContext {
    pub viewport: Viewport,
    pub plot_offset: PlotOffset,
    pub plot_width: f64,
    pub plot_height: f64,
    pub selection: Option<SelectionRect>,
    transforms: IndexMap<AxisId, AxisTransform>,
}

impl DrawContext {
    #[must_use]
    pub(crate) fn new(
        viewport: Viewport,
        plot_offset: PlotOffset,
        plot_width: f64,
        plot_height: f64,
        selection: Option<SelectionRect>,
        transforms: IndexMap<AxisId, AxisTransform>,
    ) -> Self {
        Self {
            viewport,
            plot_offset,
            plot_width,
            plot_height,
            selection,
            transforms,
        }
    }

    /// Committed transform for one axis.
    pub fn transform(&self, id: AxisId) -> PlotResult<AxisTransform> {
        self.transforms.get(&id).copied().ok_or_else(|| {
            PlotError::InvalidConfig(format!("no committed transform for axis {id:?}"))
        })
    }

    pub fn transforms(&self) -> impl Iterator<Item = (AxisId, AxisTransform)> + '_ {
        self.transforms.iter().map(|(id, transform)| (*id, *transform))
    }

    #[must_use]
    pub fn to_frame_x(&self, plot_x: f64) -> f64 {
        self.plot_offset.left + plot_x
    }

    #[must_use]
    pub fn to_frame_y(&self, plot_y: f64) -> f64 {
        self.plot_offset.top + plot_y
    }
}

/// Read-only engine snapshot for lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub series_len: usize,
    pub grid_ready: bool,
}

/// Draws one series. Implementations are registered in `HookRegistry` and run
/// in registration order for every series, after axis transforms commit.
pub trait SeriesRenderer {
    fn name(&self) -> &'static str;
    fn draw_series(
        &mut self,
        context: &DrawContext,
        series: &Series,
        frame: &mut RenderFrame,
    ) -> PlotResult<()>;
}

/// Draws above grid and series, once per redraw.
pub trait OverlayRenderer {
    fn name(&self) -> &'static str;
    fn draw_overlay(&mut self, context: &DrawContext, frame: &mut RenderFrame) -> PlotResult<()>;
}

pub type ProcessOptionsHook = Box<dyn FnMut(&mut PlotEngineConfig)>;
pub type LifecycleHook = Box<dyn FnMut(PluginContext)>;

/// Ordered hook lists collaborators append to.
///
/// Within each list, call order is registration order; that is the only
/// ordering contract the pipeline offers.
#[derive(Default)]
pub struct HookRegistry {
    pub(crate) process_options: Vec<ProcessOptionsHook>,
    pub(crate) draw_series: Vec<Box<dyn SeriesRenderer>>,
    pub(crate) draw_overlay: Vec<Box<dyn OverlayRenderer>>,
    pub(crate) bind_events: Vec<LifecycleHook>,
    pub(crate) shutdown: Vec<LifecycleHook>,
}

impl HookRegistry {
    /// Registry preloaded with the built-in line renderer and selection
    /// overlay as the first hooks of their lists.
    #[must_use]
    pub fn with_default_renderers() -> Self {
        let mut hooks = Self::default();
        hooks.on_draw_series(LineSeriesRenderer::default());
        hooks.on_draw_overlay(SelectionOverlayRenderer::default());
        hooks
    }

    pub fn on_process_options(
        &mut self,
        hook: impl FnMut(&mut PlotEngineConfig) + 'static,
    ) -> &mut Self {
        self.process_options.push(Box::new(hook));
        self
    }

    pub fn on_draw_series(&mut self, renderer: impl SeriesRenderer + 'static) -> &mut Self {
        self.draw_series.push(Box::new(renderer));
        self
    }

    pub fn on_draw_overlay(&mut self, renderer: impl OverlayRenderer + 'static) -> &mut Self {
        self.draw_overlay.push(Box::new(renderer));
        self
    }

    pub fn on_bind_events(&mut self, hook: impl FnMut(PluginContext) + 'static) -> &mut Self {
        self.bind_events.push(Box::new(hook));
        self
    }

    pub fn on_shutdown(&mut self, hook: impl FnMut(PluginContext) + 'static) -> &mut Self {
        self.shutdown.push(Box::new(hook));
        self
    }

    /// Registered series-renderer names, in call order.
    #[must_use]
    pub fn series_renderer_names(&self) -> Vec<&'static str> {
        self.draw_series.iter().map(|hook| hook.name()).collect()
    }

    /// Registered overlay-renderer names, in call order.
    #[must_use]
    pub fn overlay_renderer_names(&self) -> Vec<&'static str> {
        self.draw_overlay.iter().map(|hook| hook.name()).collect()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("process_options", &self.process_options.len())
            .field("draw_series", &self.series_renderer_names())
            .field("draw_overlay", &self.overlay_renderer_names())
            .field("bind_events", &self.bind_events.len())
            .field("shutdown", &self.shutdown.len())
            .finish()
    }
}
