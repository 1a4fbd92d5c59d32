use std::ops::Range;

use tracing::warn;

use crate::core::Sample;

/// Largest-Triangle-Three-Buckets downsampling.
///
/// Returns `points` unchanged when `threshold >= points.len()`. Otherwise the
/// output has exactly `threshold` samples (thresholds below 2 are clamped to
/// 2), always starting and ending with the input endpoints.
///
/// Within each bucket the earliest candidate with the largest triangle area
/// is kept, so a bucket of colinear candidates emits its first sample.
#[must_use]
pub fn downsample(points: &[Sample], threshold: usize) -> Vec<Sample> {
    let len = points.len();
    if threshold >= len {
        return points.to_vec();
    }

    let threshold = if threshold < 2 {
        warn!(threshold, "downsample threshold below 2, clamping to 2");
        2
    } else {
        threshold
    };
    if threshold >= len {
        return points.to_vec();
    }

    let buckets = bucket_ranges(len, threshold - 2);
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0]);

    let mut anchor = points[0];
    for (bucket_index, bucket) in buckets.iter().enumerate() {
        let next = match buckets.get(bucket_index + 1) {
            Some(next_bucket) => centroid(&points[next_bucket.clone()]),
            None => points[len - 1],
        };

        let mut best = bucket.start;
        let mut best_area = triangle_area_x2(anchor, points[best], next);
        for candidate in bucket.start + 1..bucket.end {
            let area = triangle_area_x2(anchor, points[candidate], next);
            if area > best_area {
                best_area = area;
                best = candidate;
            }
        }

        anchor = points[best];
        sampled.push(anchor);
    }

    sampled.push(points[len - 1]);
    sampled
}

/// Splits the interior indices `1..len-1` into `count` contiguous buckets.
///
/// Each bucket takes `ceil(remaining / buckets_left)` samples, so sizes step
/// down monotonically and the buckets cover the interior exactly.
fn bucket_ranges(len: usize, count: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(count);
    let mut start = 1;
    let mut remaining = len.saturating_sub(2);
    for buckets_left in (1..=count).rev() {
        if remaining == 0 {
            break;
        }
        let size = remaining.div_ceil(buckets_left);
        ranges.push(start..start + size);
        start += size;
        remaining -= size;
    }
    ranges
}

fn centroid(bucket: &[Sample]) -> Sample {
    let count = bucket.len() as f64;
    let (sum_x, sum_y) = bucket
        .iter()
        .fold((0.0, 0.0), |(sx, sy), sample| (sx + sample.x, sy + sample.y));
    Sample::new(sum_x / count, sum_y / count)
}

/// Twice the triangle area (shoelace); only relative magnitude matters.
fn triangle_area_x2(a: Sample, b: Sample, c: Sample) -> f64 {
    ((a.x - c.x) * (b.y - a.y) - (a.x - b.x) * (c.y - a.y)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_interior_with_descending_sizes() {
        let ranges = bucket_ranges(12, 3);
        assert_eq!(ranges, vec![1..5, 5..8, 8..11]);
    }

    #[test]
    fn colinear_bucket_keeps_first_candidate() {
        let points: Vec<Sample> = (0..10).map(|i| Sample::new(i as f64, 2.0)).collect();
        let reduced = downsample(&points, 4);
        assert_eq!(reduced.len(), 4);
        // interior buckets are 1..5 and 5..9
        assert_eq!(reduced[1], points[1]);
        assert_eq!(reduced[2], points[5]);
    }

    #[test]
    fn peak_survives_reduction() {
        let mut points: Vec<Sample> = (0..21).map(|i| Sample::new(i as f64, 0.0)).collect();
        points[7].y = 50.0;
        let reduced = downsample(&points, 5);
        assert!(reduced.iter().any(|sample| sample.y == 50.0));
    }

    #[test]
    fn threshold_below_two_clamps() {
        let points: Vec<Sample> = (0..5).map(|i| Sample::new(i as f64, i as f64)).collect();
        let reduced = downsample(&points, 0);
        assert_eq!(reduced, vec![points[0], points[4]]);
    }
}
