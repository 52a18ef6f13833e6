mod engine;
mod engine_config;
mod grid_layout;
mod render_pass;
mod snapshot;

pub use engine::{AxisRange, PlotEngine, SelectionRanges};
pub use engine_config::{GridStyle, PlotEngineConfig};
pub use snapshot::{AxisSnapshot, PlotSnapshot, SeriesSnapshot};
