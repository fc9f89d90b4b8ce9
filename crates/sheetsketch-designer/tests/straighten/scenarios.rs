use sheetsketch_core::{EdgeClass, Point, Scale};
use sheetsketch_designer::{
    run_stages, straighten, Drawing, DecorationSet, PaintMarking, PipelineConfig,
};

fn stroke(pts: &[(f64, f64)]) -> Vec<Point> {
    pts.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn rectangle_stroke() -> Vec<Point> {
    stroke(&[(0.0, 0.0), (50.0, 1.0), (100.0, 0.0), (100.0, 50.0), (0.0, 49.0)])
}

fn zigzag_stroke() -> Vec<Point> {
    stroke(&[
        (0.0, 0.0),
        (60.0, 2.0),
        (121.0, 1.0),
        (123.0, 58.0),
        (122.0, 120.0),
        (190.0, 121.0),
        (250.0, 180.0),
    ])
}

#[test]
fn test_rectangle_round_trip() {
    let config = PipelineConfig::default();
    let poly = straighten(&rectangle_stroke(), &config).unwrap();
    assert!((4..=5).contains(&poly.vertex_count()));

    let axis_aligned = poly
        .edges()
        .filter(|e| e.class() != EdgeClass::Diagonal)
        .count();
    assert!(axis_aligned * 2 > poly.edge_count());

    let drawing = Drawing::new(
        &poly,
        DecorationSet::new(),
        &PaintMarking::default(),
        Scale::new(0.5),
    );
    let perimeter: f64 = poly.edges().map(|e| e.length).sum();
    assert_eq!(drawing.total_length_mm, (perimeter * 0.5).round() as i64);
    assert_eq!(drawing.total_length_mm, 125);
}

#[test]
fn test_stage_trace() {
    let trace = run_stages(&rectangle_stroke(), &PipelineConfig::default());
    assert_eq!(trace.simplified.len(), 4);
    assert_eq!(trace.bound_iterations, 0);
    assert_eq!(trace.normalized.len(), trace.bounded.len());
}

#[test]
fn test_translation_equivariance() {
    let config = PipelineConfig::default();
    for raw in [rectangle_stroke(), zigzag_stroke()] {
        let base = straighten(&raw, &config).unwrap();
        for (dx, dy) in [(250.0, -75.0), (-1000.0, 333.0)] {
            let moved: Vec<Point> = raw.iter().map(|p| p.offset(dx, dy)).collect();
            let out = straighten(&moved, &config).unwrap();
            assert_eq!(out.vertex_count(), base.vertex_count());
            for (a, b) in base.points().iter().zip(out.points()) {
                assert!((a.x + dx - b.x).abs() < 1e-6, "{} vs {}", a, b);
                assert!((a.y + dy - b.y).abs() < 1e-6, "{} vs {}", a, b);
            }
        }
    }
}

#[test]
fn test_bound_applies_to_long_strokes() {
    // a staircase with far more steps than the default bound
    let mut raw = vec![Point::new(0.0, 0.0)];
    for i in 0..12 {
        let last = raw[raw.len() - 1];
        let step = 30.0 + 4.0 * i as f64;
        raw.push(if i % 2 == 0 {
            last.offset(step, 0.0)
        } else {
            last.offset(0.0, step)
        });
    }
    let config = PipelineConfig::default();
    let trace = run_stages(&raw, &config);
    assert!(trace.bounded.len() - 1 <= config.max_segments);
    let poly = straighten(&raw, &config).unwrap();
    assert!(poly.edge_count() <= config.max_segments);
}
