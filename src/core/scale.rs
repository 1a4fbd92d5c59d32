use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Minimum half-width used to widen a zero-span domain.
const DEGENERATE_DOMAIN_PADDING: f64 = 0.5;

/// Relative half-width used once `DEGENERATE_DOMAIN_PADDING` is lost to
/// rounding at large magnitudes.
const DEGENERATE_DOMAIN_RELATIVE_PADDING: f64 = 1e-9;

/// Linear mapping from a data domain onto a device-pixel range.
///
/// The range may be reversed (`range_start > range_end`), which is how the
/// y axis maps larger values towards the top of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::DegenerateDomain {
                start: domain_start,
                end: domain_end,
            });
        }
        if !(domain_end - domain_start).is_finite() {
            return Err(ChartError::InvalidData(format!(
                "scale domain [{domain_start}, {domain_end}] spans more than f64 can represent"
            )));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Like [`LinearScale::new`], but widens a zero-span domain around its
    /// value instead of failing.
    ///
    /// The half-width is `max(0.5, |value| * 1e-9)` so it survives rounding
    /// for large values such as nanosecond timestamps; endpoints are clamped
    /// to the finite `f64` range.
    pub fn new_widened(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        if domain_start == domain_end && domain_start.is_finite() {
            let padding = DEGENERATE_DOMAIN_PADDING
                .max(domain_start.abs() * DEGENERATE_DOMAIN_RELATIVE_PADDING);
            return Self::new(
                (domain_start - padding).max(f64::MIN),
                (domain_end + padding).min(f64::MAX),
                range_start,
                range_end,
            );
        }
        Self::new(domain_start, domain_end, range_start, range_end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn forward(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Exact algebraic inverse of [`LinearScale::forward`].
    ///
    /// A zero-width range collapses every pixel onto `domain_start`.
    #[must_use]
    pub fn inverse(self, pixel: f64) -> f64 {
        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / range_span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// `true` when larger domain values map to larger range values.
    #[must_use]
    pub fn is_increasing(self) -> bool {
        (self.domain_end - self.domain_start).signum() == (self.range_end - self.range_start).signum()
    }
}
