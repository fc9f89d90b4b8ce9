//! Collinearity merging.

use sheetsketch_core::{angle_between, angular_difference, Point};

/// Default tolerance used right after snapping.
pub const DEFAULT_MERGE_TOLERANCE_DEG: f64 = 5.0;
/// Tighter tolerance used after a manual edge edit.
pub const EDIT_MERGE_TOLERANCE_DEG: f64 = 3.0;

/// Removes interior vertices whose adjacent edges are within `tol_deg` of
/// each other, and vertices that coincide with their kept predecessor.
///
/// Endpoints are never removed. The greedy sweep compares against the last
/// kept vertex, so dropping one vertex can expose another; sweeps repeat
/// until nothing changes, which makes the result a fixed point:
/// `merge_collinear(&merge_collinear(p, t), t) == merge_collinear(p, t)`.
pub fn merge_collinear(points: &[Point], tol_deg: f64) -> Vec<Point> {
    let mut current = points.to_vec();
    loop {
        let next = merge_pass(&current, tol_deg);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn merge_pass(points: &[Point], tol_deg: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for i in 1..points.len() - 1 {
        let a = out[out.len() - 1];
        let b = points[i];
        let c = points[i + 1];
        if a.coincides_with(&b) {
            continue;
        }
        let diff = angular_difference(angle_between(a, b), angle_between(b, c));
        if diff > tol_deg {
            out.push(b);
        }
    }

    let end = points[points.len() - 1];
    // the final point replaces a kept vertex sitting on top of it
    if out.len() > 1 && out[out.len() - 1].coincides_with(&end) {
        out.pop();
    }
    out.push(end);
    out
}
