//! plotline: interactive 2-D chart axis scaling and rendering engine.
//!
//! The crate converts numeric series into positioned geometry on a pixel
//! surface, computes human-readable axis ticks (linear and calendar-time),
//! and keeps pan/zoom/selection interaction numerically consistent with the
//! data-to-pixel transform used for drawing and hit-testing.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod surface;
pub mod telemetry;

pub use api::{PlotEngine, PlotEngineConfig};
pub use error::{PlotError, PlotResult};
