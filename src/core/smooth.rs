use crate::core::Sample;

/// Default number of arc samples emitted per interior vertex.
pub const DEFAULT_SMOOTHING_STEPS: usize = 5;

/// Weight of the corner vertex when placing the arc control points.
const CORNER_WEIGHT: f64 = 0.9;

/// Rounds every interior corner with a short quadratic Bezier arc.
///
/// Interior vertex `P[i]` is replaced by `steps` samples of the curve through
/// `p1 = lerp(P[i], P[i-1], 0.1)`, `P[i]` and `p2 = lerp(P[i], P[i+1], 0.1)`
/// at `t = 0, 1/steps, ..., (steps-1)/steps`. Endpoints pass through, so the
/// output length is `2 + (n - 2) * steps`. Series shorter than three samples
/// and `steps == 0` are returned unchanged.
#[must_use]
pub fn smooth(points: &[Sample], steps: usize) -> Vec<Sample> {
    if points.len() < 3 || steps == 0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(2 + (points.len() - 2) * steps);
    out.push(points[0]);
    for window in points.windows(3) {
        let (prev, corner, next) = (window[0], window[1], window[2]);
        let p1 = lerp(corner, prev, 1.0 - CORNER_WEIGHT);
        let p2 = lerp(corner, next, 1.0 - CORNER_WEIGHT);
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            out.push(quadratic_bezier(p1, corner, p2, t));
        }
    }
    out.push(points[points.len() - 1]);
    out
}

fn lerp(from: Sample, to: Sample, t: f64) -> Sample {
    Sample::new(from.x + (to.x - from.x) * t, from.y + (to.y - from.y) * t)
}

fn quadratic_bezier(p0: Sample, p1: Sample, p2: Sample, t: f64) -> Sample {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;
    Sample::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}
