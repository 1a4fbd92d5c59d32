use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("sample {index} mixes bare values and [x, y] pairs in one series")]
    MixedSampleInput { index: usize },

    #[error("scale domain is degenerate: [{start}, {end}]")]
    DegenerateDomain { start: f64, end: f64 },

    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("rendering backend failure: {0}")]
    Backend(String),
}
