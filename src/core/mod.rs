pub mod axis;
pub mod primitives;
pub mod series;
pub mod ticks;
pub mod time_ticks;
pub mod types;

pub use axis::{Axis, AxisOptions, AxisTransform, TickGeneratorKind};
pub use series::{Series, SeriesData, default_series_color};
pub use ticks::{LinearTickGenerator, Tick, TickGenerator, TickSize, TimeUnit};
pub use time_ticks::TimeTickGenerator;
pub use types::{AxisDirection, AxisId, DataPoint, PlotOffset, Viewport};
