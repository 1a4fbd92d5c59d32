use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Sample;

/// Number of ticks the y range is divided into when choosing a step.
pub const TARGET_TICK_COUNT: f64 = 16.0;

/// Step multipliers tried in ascending order against a power of ten.
const NICE_STEP_FACTORS: [f64; 12] = [
    0.1, 0.2, 0.25, 0.3, 0.4, 0.5, 0.6, 0.7, 0.75, 0.8, 0.9, 1.0,
];

/// Padded y range snapped to a round tick step.
///
/// `tick_lower`/`tick_upper` are exact multiples of `tick_step` with at least
/// one tick of padding around the data; `lower`/`upper` are those values
/// rounded outward to integers and are what the y scale uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NiceBounds {
    pub lower: f64,
    pub upper: f64,
    pub tick_step: f64,
    pub tick_lower: f64,
    pub tick_upper: f64,
}

/// Computes [`NiceBounds`] over the sample y values.
///
/// Returns `None` for an empty series or when no sample is finite. Data whose
/// padded bounds would overflow `f64` keeps its unpadded extent, with one
/// tick spanning the whole range.
#[must_use]
pub fn nice_bounds(points: &[Sample]) -> Option<NiceBounds> {
    let finite = || points.iter().map(|p| p.y).filter(|y| y.is_finite());
    let min = finite().map(OrderedFloat).min()?.0;
    let max = finite().map(OrderedFloat).max()?.0;

    let mut span = max - min;
    if span <= 0.0 {
        span = min.abs().max(1.0);
    }

    let tick_step = nice_step(span / TARGET_TICK_COUNT);
    let tick_lower = tick_step * (min / tick_step - 1.0).floor();
    let tick_upper = tick_step * (1.0 + max / tick_step).ceil();

    if !(tick_upper - tick_lower).is_finite() {
        debug!(min, max, "padded bounds overflow f64, using data extent");
        return Some(NiceBounds {
            lower: min,
            upper: max,
            tick_step: span,
            tick_lower: min,
            tick_upper: max,
        });
    }

    Some(NiceBounds {
        lower: tick_lower.floor(),
        upper: tick_upper.ceil(),
        tick_step,
        tick_lower,
        tick_upper,
    })
}

/// Smallest "nice" step that is `>= raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor() + 1.0);
    NICE_STEP_FACTORS
        .iter()
        .map(|factor| factor * magnitude)
        .find(|candidate| *candidate >= raw)
        .unwrap_or(magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_picks_smallest_candidate_at_or_above_raw() {
        assert_eq!(nice_step(2.1875), 2.5);
        assert_eq!(nice_step(7.2), 7.5);
    }

    #[test]
    fn bounds_near_f64_max_stay_finite() {
        let points = [Sample::new(0.0, 0.0), Sample::new(1.0, 1.7e308)];
        let bounds = nice_bounds(&points).expect("bounds");
        assert_eq!(bounds.lower, 0.0);
        assert_eq!(bounds.upper, 1.7e308);
        assert!(bounds.tick_step.is_finite() && bounds.tick_step > 0.0);
    }

    #[test]
    fn empty_series_has_no_bounds() {
        assert!(nice_bounds(&[]).is_none());
    }
}
