//! Edge length/angle editing.
//!
//! Editing edge `i` moves only its end vertex; every vertex after it is
//! translated by the same delta, so the tail keeps its shape exactly and only
//! its position changes. Nothing before the edited edge moves.

use sheetsketch_core::{
    normalize_degrees, parse_number, point_from_polar, snap_angle, Point, Scale,
    DEFAULT_SNAP_STEP,
};

use crate::merge::merge_collinear;
use crate::polyline::{Edge, Polyline};

/// Shortest edge, in pixels, an edit can produce.
pub const MIN_EDGE_PX: f64 = 1.0;
/// Longest edge, in pixels, an edit can produce.
pub const MAX_EDGE_PX: f64 = 50_000.0;

/// A requested change to one edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeEditRequest {
    /// New length in millimetres; `None` keeps the current length.
    pub length_mm: Option<f64>,
    /// New direction in degrees; only honoured when `angle_enabled`.
    pub angle_deg: Option<f64>,
    pub angle_enabled: bool,
}

impl EdgeEditRequest {
    pub fn length(length_mm: f64) -> Self {
        Self {
            length_mm: Some(length_mm),
            ..Self::default()
        }
    }

    pub fn length_and_angle(length_mm: f64, angle_deg: f64) -> Self {
        Self {
            length_mm: Some(length_mm),
            angle_deg: Some(angle_deg),
            angle_enabled: true,
        }
    }

    /// Builds a request from text fields; unparsable text counts as absent.
    pub fn parse(length_text: &str, angle_text: &str, angle_enabled: bool) -> Self {
        Self {
            length_mm: parse_number(length_text),
            angle_deg: parse_number(angle_text),
            angle_enabled,
        }
    }

    /// Target length in pixels, falling back to the edge's current length.
    pub fn resolve_length_px(&self, edge: &Edge, scale: Scale) -> f64 {
        match self.length_mm.filter(|v| v.is_finite()) {
            Some(mm) => scale.mm_to_px(mm).clamp(MIN_EDGE_PX, MAX_EDGE_PX),
            None => edge.length,
        }
    }

    /// Target direction in degrees.
    ///
    /// With angle editing off the edge keeps its snapped direction. With it
    /// on, the requested angle is rounded to a whole degree and wrapped; a
    /// missing value keeps the edge's current direction.
    pub fn resolve_angle(&self, edge: &Edge) -> f64 {
        if !self.angle_enabled {
            return snap_angle(edge.angle, DEFAULT_SNAP_STEP);
        }
        match self.angle_deg.filter(|v| v.is_finite()) {
            Some(deg) => normalize_degrees(deg.round()),
            None => edge.angle,
        }
    }
}

/// Values pre-filled in the edge editor when an edge is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDraft {
    pub index: usize,
    pub length_mm: i64,
    pub angle_deg: i64,
}

impl EdgeDraft {
    pub fn for_edge(edge: &Edge, scale: Scale) -> Self {
        Self {
            index: edge.index,
            length_mm: scale.px_to_whole_mm(edge.length),
            angle_deg: (edge.angle.round() as i64).rem_euclid(360),
        }
    }
}

/// Moves vertex `index` to `new_position` and shifts every later vertex by
/// the same delta. Earlier vertices are untouched.
pub fn rebuild_tail_from(points: &[Point], index: usize, new_position: Point) -> Vec<Point> {
    let mut out = points.to_vec();
    let Some(old) = points.get(index) else {
        return out;
    };
    let (dx, dy) = (new_position.x - old.x, new_position.y - old.y);
    for p in out.iter_mut().skip(index) {
        *p = p.offset(dx, dy);
    }
    out
}

/// Applies `request` to edge `index` of `polyline`.
///
/// The result is collinearity-merged with `merge_tol_deg` so a newly
/// straight joint disappears.
pub fn edit_edge(
    polyline: &Polyline,
    index: usize,
    request: &EdgeEditRequest,
    scale: Scale,
    merge_tol_deg: f64,
) -> crate::Result<Polyline> {
    let edge = polyline.edge(index)?;
    let length = request.resolve_length_px(&edge, scale);
    let angle = request.resolve_angle(&edge);
    let new_end = point_from_polar(edge.start, length, angle);

    let rebuilt = rebuild_tail_from(polyline.points(), index + 1, new_end);
    let merged = merge_collinear(&rebuilt, merge_tol_deg);
    tracing::debug!(
        "Edited edge {}: {:.1}px @ {:.0}° -> {:.1}px @ {:.0}°",
        index,
        edge.length,
        edge.angle,
        length,
        angle
    );
    // an edit that folds the shape back onto a vertex can still collapse it
    Ok(Polyline::new(merged)?)
}
