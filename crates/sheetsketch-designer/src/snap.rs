//! Direction snapping.

use sheetsketch_core::{angle_between, distance, point_from_polar, snap_angle, Point};

/// Rebuilds `points` so every edge points along a multiple of `step` degrees.
///
/// Each edge keeps its original length. Its direction is taken from the
/// original (unsnapped) vertices, but the new endpoint is projected from the
/// already-snapped previous vertex, so the result is order-dependent.
pub fn snap_polyline(points: &[Point], step: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(2) {
        let anchor = out[out.len() - 1];
        let length = distance(w[0], w[1]);
        let angle = snap_angle(angle_between(w[0], w[1]), step);
        out.push(point_from_polar(anchor, length, angle));
    }
    out
}
