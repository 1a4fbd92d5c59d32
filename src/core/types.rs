use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Layout box of the chart surface, in logical (CSS-like) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Device surface size for the given resolution multiplier.
    ///
    /// Both axes are rounded to the nearest whole device pixel and never drop
    /// below one pixel for a valid viewport.
    #[must_use]
    pub fn device_size(self, pixel_ratio: f64) -> (u32, u32) {
        let scale = |v: u32| ((f64::from(v) * pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

/// One chart sample in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Uses the timestamp (unix seconds, millisecond precision) as `x`.
    #[must_use]
    pub fn from_time(time: DateTime<Utc>, y: f64) -> Self {
        Self {
            x: time.timestamp_millis() as f64 / 1000.0,
            y,
        }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> ChartResult<Self> {
        let y = value.to_f64().ok_or_else(|| {
            ChartError::InvalidData("sample value cannot be represented as f64".to_owned())
        })?;
        Ok(Self::from_time(time, y))
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Input sample as supplied by the host: a bare y value or an `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSample {
    Value(f64),
    Pair([f64; 2]),
}

impl From<f64> for RawSample {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<(f64, f64)> for RawSample {
    fn from((x, y): (f64, f64)) -> Self {
        Self::Pair([x, y])
    }
}

/// Shape of the input series, fixed once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleKind {
    /// Bare y values; `x` is the sample index.
    #[default]
    Values,
    /// Explicit `[x, y]` pairs.
    Pairs,
}

/// Resolves raw input into canonical samples.
///
/// Rejects series that mix bare values with pairs, non-finite coordinates, and
/// pairs whose `x` decreases. An empty input resolves to [`SampleKind::Values`].
pub fn normalize_samples(raw: &[RawSample]) -> ChartResult<(Vec<Sample>, SampleKind)> {
    let kind = match raw.first() {
        Some(RawSample::Pair(_)) => SampleKind::Pairs,
        _ => SampleKind::Values,
    };

    let mut samples = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        let sample = match (kind, entry) {
            (SampleKind::Values, RawSample::Value(y)) => Sample::new(index as f64, *y),
            (SampleKind::Pairs, RawSample::Pair([x, y])) => Sample::new(*x, *y),
            _ => return Err(ChartError::MixedSampleInput { index }),
        };
        if !sample.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "sample {index} must have finite coordinates"
            )));
        }
        if samples.last().is_some_and(|previous: &Sample| sample.x < previous.x) {
            return Err(ChartError::InvalidData(format!(
                "sample {index} breaks non-decreasing x order"
            )));
        }
        samples.push(sample);
    }

    Ok((samples, kind))
}
