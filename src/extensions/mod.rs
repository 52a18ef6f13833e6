mod hooks;
mod line_renderer;
mod selection_overlay;

pub use hooks::{
    DrawContext, HookRegistry, LifecycleHook, OverlayRenderer, PluginContext, ProcessOptionsHook,
    SeriesRenderer,
};
pub use line_renderer::LineSeriesRenderer;
pub use selection_overlay::SelectionOverlayRenderer;
