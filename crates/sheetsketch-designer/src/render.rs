//! Lyon path output for view and export collaborators.

use lyon::math::point;
use lyon::path::Path;
use sheetsketch_core::{Point, Scale};

use crate::decoration::{decoration_outline, Decoration};
use crate::polyline::{Bounds, Polyline};

fn open_path(points: &[Point]) -> Path {
    let mut builder = Path::builder();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        builder.begin(point(first.x as f32, first.y as f32));
        for p in iter {
            builder.line_to(point(p.x as f32, p.y as f32));
        }
        builder.end(false);
    }
    builder.build()
}

/// Open path through every vertex of the polyline.
pub fn polyline_path(polyline: &Polyline) -> Path {
    open_path(polyline.points())
}

/// Open path of one decoration's outline.
pub fn decoration_path(polyline: &Polyline, decoration: &Decoration, scale: Scale) -> Path {
    open_path(&decoration_outline(polyline, decoration, scale))
}

/// Axis-aligned bounds of a rendered path.
pub fn path_bounds(path: &Path) -> Bounds {
    let bb = lyon::algorithms::aabb::bounding_box(path.iter());
    Bounds {
        min_x: bb.min.x as f64,
        min_y: bb.min.y as f64,
        max_x: bb.max.x as f64,
        max_y: bb.max.y as f64,
    }
}
