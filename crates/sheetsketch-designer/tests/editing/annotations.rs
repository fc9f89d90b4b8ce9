use sheetsketch_core::{Point, Scale};
use sheetsketch_designer::{
    decoration_outline, side_from_angle, Decoration, DecorationKind, EdgeEditRequest,
    EndPosition, FoldSize, PaintSide, PointerRelease, SketchSession,
};

fn committed_session() -> SketchSession {
    let mut session = SketchSession::default();
    session.pointer_down(Point::new(0.0, 0.0));
    for p in [(100.0, 0.0), (100.0, 60.0), (160.0, 60.0), (160.0, 20.0)] {
        session.pointer_move(Point::new(p.0, p.1));
    }
    assert!(matches!(
        session.pointer_up(),
        PointerRelease::Committed { edge_count: 4, .. }
    ));
    session
}

#[test]
fn test_decoration_survives_unrelated_edit() {
    let mut session = committed_session();
    let hem = Decoration::new(EndPosition::Start, DecorationKind::HemClosed, FoldSize::Mm10);
    session.add_decoration(hem).unwrap();
    let outline_before = session.decoration_outlines()[0].1.clone();

    session
        .apply_edge_edit(3, &EdgeEditRequest::length(45.0))
        .unwrap();

    let stored: Vec<_> = session.decorations().iter().copied().collect();
    assert_eq!(stored, vec![hem]);
    let outline_after = session.decoration_outlines()[0].1.clone();
    assert_eq!(outline_before, outline_after);
}

#[test]
fn test_end_decoration_follows_edit() {
    let mut session = committed_session();
    let crease = Decoration::new(EndPosition::End, DecorationKind::Crease, FoldSize::Mm5);
    session.add_decoration(crease).unwrap();
    session
        .apply_edge_edit(1, &EdgeEditRequest::length(50.0))
        .unwrap();

    let poly = session.polyline().unwrap();
    let outline = decoration_outline(poly, &crease, Scale::default());
    assert_eq!(outline[0], poly.last());
    assert_eq!(session.decoration_outlines()[0].1, outline);
}

#[test]
fn test_paint_sector_boundaries() {
    assert_eq!(side_from_angle(45.0), PaintSide::Bottom);
    assert_eq!(side_from_angle(134.9), PaintSide::Bottom);
    assert_eq!(side_from_angle(135.0), PaintSide::Left);
}

#[test]
fn test_paint_unlock_reopens_marking() {
    let mut session = committed_session();
    session.set_paint_mode(true);
    session.pointer_down(Point::new(80.0, 10.0));
    session.pointer_move(Point::new(80.0, 90.0));
    assert_eq!(session.pointer_up(), PointerRelease::PaintAimed(PaintSide::Bottom));
    session.commit_paint("#123456", "Custom").unwrap();

    session.unlock_paint();
    session.pointer_down(Point::new(80.0, 10.0));
    session.pointer_move(Point::new(0.0, 10.0));
    assert_eq!(session.pointer_up(), PointerRelease::PaintAimed(PaintSide::Left));
    assert_eq!(session.paint().color_hex, "#123456");
}
