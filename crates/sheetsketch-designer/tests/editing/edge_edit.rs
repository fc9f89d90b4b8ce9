use sheetsketch_core::{angular_difference, Point, Scale};
use sheetsketch_designer::{
    edit_edge, rebuild_tail_from, EdgeEditRequest, Polyline, EDIT_MERGE_TOLERANCE_DEG,
};

fn profile() -> Polyline {
    Polyline::new(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 60.0),
        Point::new(160.0, 60.0),
        Point::new(160.0, 20.0),
        Point::new(240.0, 20.0),
    ])
    .unwrap()
}

#[test]
fn test_tail_is_invariant_under_length_edits() {
    let poly = profile();
    for i in 0..poly.edge_count() {
        let out = edit_edge(
            &poly,
            i,
            &EdgeEditRequest::length(77.0),
            Scale::default(),
            EDIT_MERGE_TOLERANCE_DEG,
        )
        .unwrap();
        assert_eq!(out.edge_count(), poly.edge_count());

        let before: Vec<_> = poly.edges().collect();
        let after: Vec<_> = out.edges().collect();
        assert!((after[i].length - 154.0).abs() < 1e-9);
        for j in 0..i {
            assert_eq!(before[j], after[j]);
        }
        for j in i + 1..before.len() {
            assert!((before[j].length - after[j].length).abs() < 1e-9);
            assert!(angular_difference(before[j].angle, after[j].angle) < 1e-9);
        }
    }
}

#[test]
fn test_tail_is_invariant_under_angle_edits() {
    let poly = profile();
    let out = edit_edge(
        &poly,
        1,
        &EdgeEditRequest::length_and_angle(30.0, 135.0),
        Scale::default(),
        EDIT_MERGE_TOLERANCE_DEG,
    )
    .unwrap();
    let before: Vec<_> = poly.edges().collect();
    let after: Vec<_> = out.edges().collect();
    assert!(angular_difference(after[1].angle, 135.0) < 1e-9);
    for j in 2..before.len() {
        assert!((before[j].length - after[j].length).abs() < 1e-9);
        assert!(angular_difference(before[j].angle, after[j].angle) < 1e-9);
    }
}

#[test]
fn test_rebuild_tail_from_shifts_only_tail() {
    let pts = profile().into_points();
    let out = rebuild_tail_from(&pts, 2, Point::new(100.0, 90.0));
    assert_eq!(&out[..2], &pts[..2]);
    assert_eq!(out[2], Point::new(100.0, 90.0));
    assert_eq!(out[5], Point::new(240.0, 50.0));

    // an index past the end leaves everything in place
    assert_eq!(rebuild_tail_from(&pts, 9, Point::new(0.0, 0.0)), pts);
}
