use proptest::prelude::*;
use sheetsketch_core::{
    angle_between, angular_difference, distance, point_from_polar, snap_angle, Point,
    DEFAULT_SNAP_STEP,
};

#[test]
fn test_point_distance() {
    let p1 = Point::new(0.0, 0.0);
    let p2 = Point::new(3.0, 4.0);
    assert_eq!(p1.distance_to(&p2), 5.0);
    assert_eq!(distance(p2, p1), 5.0);
}

#[test]
fn test_polar_projection_recovers_direction() {
    let origin = Point::new(12.0, -4.0);
    for deg in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
        let p = point_from_polar(origin, 25.0, deg);
        assert!((distance(origin, p) - 25.0).abs() < 1e-9);
        assert!(angular_difference(angle_between(origin, p), deg) < 1e-9);
    }
}

proptest! {
    #[test]
    fn snapped_angles_are_canonical(deg in -1000.0f64..1000.0) {
        let s = snap_angle(deg, DEFAULT_SNAP_STEP);
        prop_assert!((0.0..360.0).contains(&s));
        prop_assert_eq!(s % DEFAULT_SNAP_STEP, 0.0);
        prop_assert!(angular_difference(s, deg) <= DEFAULT_SNAP_STEP / 2.0 + 1e-9);
    }

    #[test]
    fn angle_between_is_normalized(x in -500.0f64..500.0, y in -500.0f64..500.0) {
        let a = angle_between(Point::new(0.0, 0.0), Point::new(x, y));
        prop_assert!((0.0..360.0).contains(&a));
    }
}
