mod chart_config;
mod hover;
mod line_chart;
mod pipeline;

pub use chart_config::{AUTO_DOWNSAMPLE_PX_PER_POINT, ChartConfig, DownsampleMode};
pub use line_chart::{HoverHandler, LeaveHandler, LineChart};
pub use pipeline::{ChartGeometry, build_geometry};
