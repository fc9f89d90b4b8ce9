use proptest::prelude::*;
use sheetsketch_core::{snap_angle, Point, DEFAULT_SNAP_STEP};
use sheetsketch_designer::{
    bound_segments, merge_collinear, normalize_profile, straighten, PipelineConfig,
    DEFAULT_MERGE_TOLERANCE_DEG,
};

fn points_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-500.0..500.0f64, -500.0..500.0f64), min..max)
        .prop_map(|raw| raw.into_iter().map(|(x, y)| Point::new(x, y)).collect())
}

#[test]
fn test_snap_values() {
    assert_eq!(snap_angle(44.0, DEFAULT_SNAP_STEP), 45.0);
    assert_eq!(snap_angle(91.0, DEFAULT_SNAP_STEP), 90.0);
    assert_eq!(snap_angle(0.0, DEFAULT_SNAP_STEP), 0.0);
    assert_eq!(snap_angle(359.0, DEFAULT_SNAP_STEP), 0.0);
}

proptest! {
    #[test]
    fn prop_merge_is_idempotent(points in points_strategy(0, 24), tol in 0.0..45.0f64) {
        let once = merge_collinear(&points, tol);
        let twice = merge_collinear(&once, tol);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_merge_keeps_endpoints(points in points_strategy(2, 24)) {
        let merged = merge_collinear(&points, DEFAULT_MERGE_TOLERANCE_DEG);
        prop_assert_eq!(merged[0], points[0]);
        prop_assert_eq!(merged[merged.len() - 1], points[points.len() - 1]);
    }

    #[test]
    fn prop_bounder_respects_bound(points in points_strategy(2, 32), max in 1usize..10) {
        let edges_before = points.len() - 1;
        let out = bound_segments(&points, max, DEFAULT_SNAP_STEP, DEFAULT_MERGE_TOLERANCE_DEG);
        prop_assert!(out.points.len() >= 2);
        prop_assert!(out.points.len() - 1 <= max);
        prop_assert!(out.iterations <= edges_before.saturating_sub(max));
    }

    #[test]
    fn prop_renormalizing_a_committed_profile_changes_nothing(
        raw in prop::collection::vec((0.0..400.0f64, 0.0..400.0f64), 2..30)
    ) {
        let raw: Vec<Point> = raw.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        let config = PipelineConfig::default();
        if let Some(poly) = straighten(&raw, &config) {
            let again = normalize_profile(poly.points(), &config.normalize);
            prop_assert_eq!(again.len(), poly.vertex_count());
            for (a, b) in poly.points().iter().zip(&again) {
                prop_assert!(a.distance_to(b) < 1e-6, "{} moved to {}", a, b);
            }
        }
    }
}
