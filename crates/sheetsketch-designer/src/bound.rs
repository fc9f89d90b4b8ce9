//! Segment-count bounding.

use crate::merge::merge_collinear;
use crate::snap::snap_polyline;
use sheetsketch_core::{distance, Point};

/// Default maximum number of edges in a straightened sketch.
pub const DEFAULT_MAX_SEGMENTS: usize = 8;

/// Result of [`bound_segments`].
#[derive(Debug, Clone, PartialEq)]
pub struct BoundOutcome {
    pub points: Vec<Point>,
    /// Number of shortest-edge removals performed.
    pub iterations: usize,
}

/// Index of the shortest edge; ties go to the first one.
pub fn shortest_edge(points: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, w) in points.windows(2).enumerate() {
        let len = distance(w[0], w[1]);
        match best {
            Some((_, min)) if len >= min => {}
            _ => best = Some((i, len)),
        }
    }
    best.map(|(i, _)| i)
}

/// Removes shortest edges until at most `max_segments` remain.
///
/// Each round deletes the trailing vertex of the shortest edge, then re-snaps
/// to `step` degrees and re-merges with `merge_tol_deg`. Every round removes
/// at least one vertex, so the loop runs at most `edges - max_segments` times.
pub fn bound_segments(
    points: &[Point],
    max_segments: usize,
    step: f64,
    merge_tol_deg: f64,
) -> BoundOutcome {
    let mut poly = points.to_vec();
    let mut iterations = 0;
    while poly.len() > 2 && poly.len() - 1 > max_segments {
        let Some(idx) = shortest_edge(&poly) else {
            break;
        };
        poly.remove(idx + 1);
        poly = snap_polyline(&poly, step);
        poly = merge_collinear(&poly, merge_tol_deg);
        iterations += 1;
    }
    if iterations > 0 {
        tracing::debug!(
            "Bounded polyline to {} edges in {} iterations",
            poly.len().saturating_sub(1),
            iterations
        );
    }
    BoundOutcome {
        points: poly,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::DEFAULT_MERGE_TOLERANCE_DEG;
    use sheetsketch_core::DEFAULT_SNAP_STEP;

    fn staircase(steps: usize) -> Vec<Point> {
        let mut pts = vec![Point::new(0.0, 0.0)];
        for i in 0..steps {
            let last = pts[pts.len() - 1];
            // alternate right/down with growing lengths so lengths are distinct
            let len = 10.0 + i as f64;
            if i % 2 == 0 {
                pts.push(Point::new(last.x + len, last.y));
            } else {
                pts.push(Point::new(last.x, last.y + len));
            }
        }
        pts
    }

    #[test]
    fn test_shortest_edge_first_occurrence() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(5.0, 20.0),
            Point::new(10.0, 20.0),
        ];
        assert_eq!(shortest_edge(&pts), Some(0));
        assert_eq!(shortest_edge(&pts[..1]), None);
    }

    #[test]
    fn test_already_within_bound() {
        let pts = staircase(4);
        let out = bound_segments(&pts, 8, DEFAULT_SNAP_STEP, DEFAULT_MERGE_TOLERANCE_DEG);
        assert_eq!(out.points, pts);
        assert_eq!(out.iterations, 0);
    }

    #[test]
    fn test_reduces_to_bound() {
        let pts = staircase(14);
        let out = bound_segments(&pts, 8, DEFAULT_SNAP_STEP, DEFAULT_MERGE_TOLERANCE_DEG);
        assert!(out.points.len() - 1 <= 8);
        assert!(out.iterations <= 14 - 8);
    }

    #[test]
    fn test_zero_bound_stops_at_single_edge() {
        let pts = staircase(5);
        let out = bound_segments(&pts, 0, DEFAULT_SNAP_STEP, DEFAULT_MERGE_TOLERANCE_DEG);
        assert_eq!(out.points.len(), 2);
    }
}
