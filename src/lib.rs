//! meshline: a single-series thick-line chart core.
//!
//! Samples flow through LTTB downsampling, optional corner smoothing and
//! linear scales into miter-joined triangle meshes, which any backend
//! implementing [`render::Renderer`] can rasterize. Interactive charts map
//! pointer positions back to the nearest sample.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, DownsampleMode, LineChart};
pub use error::{ChartError, ChartResult};
