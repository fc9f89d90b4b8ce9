//! Douglas–Peucker stroke reduction.
//!
//! This is the only lossy step of the pipeline: detail within `eps` pixels
//! of the chord is dropped in favour of a short, straight-edged polyline.

use sheetsketch_core::{perpendicular_distance, Point};

/// Default simplification tolerance in pixels.
pub const DEFAULT_TOLERANCE_PX: f64 = 10.0;

/// Reduces `points` to the vertices needed to stay within `eps` of the input.
///
/// Inputs with fewer than three points are returned unchanged. When the
/// first and last point of a range coincide the chord has no direction, every
/// distance reads as zero and the range collapses to its endpoints.
pub fn douglas_peucker(points: &[Point], eps: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = points[0];
    let last = points[points.len() - 1];
    let mut max_dist = 0.0;
    let mut index = 0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(*p, first, last);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > eps {
        let mut left = douglas_peucker(&points[..=index], eps);
        let right = douglas_peucker(&points[index..], eps);
        left.pop(); // shared split point
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}
