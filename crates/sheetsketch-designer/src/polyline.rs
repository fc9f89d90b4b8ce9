//! Committed polyline and its derived edges.

use serde::{Deserialize, Serialize};
use sheetsketch_core::{
    angle_between, classify_angle, distance, snap_angle, DrawingError, EdgeClass, GeometryError,
    Point, Scale, DEFAULT_SNAP_STEP,
};

/// Axis-aligned bounding box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// One straight edge of a polyline. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub index: usize,
    pub start: Point,
    pub end: Point,
    /// Length in pixels
    pub length: f64,
    /// Direction in degrees, `[0, 360)`
    pub angle: f64,
}

impl Edge {
    pub fn new(index: usize, start: Point, end: Point) -> Self {
        Self {
            index,
            start,
            end,
            length: distance(start, end),
            angle: angle_between(start, end),
        }
    }

    /// Direction snapped to the canonical 45° grid.
    pub fn snapped_angle(&self) -> f64 {
        snap_angle(self.angle, DEFAULT_SNAP_STEP)
    }

    pub fn class(&self) -> EdgeClass {
        classify_angle(self.snapped_angle())
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(&self.end)
    }

    pub fn length_mm(&self, scale: Scale) -> f64 {
        scale.px_to_mm(self.length)
    }
}

/// Iterates the edges of a point sequence.
pub fn edges(points: &[Point]) -> impl Iterator<Item = Edge> + '_ {
    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| Edge::new(i, w[0], w[1]))
}

/// Sum of all edge lengths in pixels.
pub fn total_length_px(points: &[Point]) -> f64 {
    edges(points).map(|e| e.length).sum()
}

/// A validated polyline: at least two finite points, no zero-length edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Validates `points` as a polyline.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                required: 2,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinitePoint { index });
        }
        if let Some(index) = points.windows(2).position(|w| w[0].coincides_with(&w[1])) {
            return Err(GeometryError::DegenerateEdge { index });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        edges(&self.points)
    }

    pub fn edge(&self, index: usize) -> Result<Edge, DrawingError> {
        if index >= self.edge_count() {
            return Err(DrawingError::EdgeOutOfRange {
                index,
                edge_count: self.edge_count(),
            });
        }
        Ok(Edge::new(index, self.points[index], self.points[index + 1]))
    }

    pub fn total_length_px(&self) -> f64 {
        total_length_px(&self.points)
    }

    /// Total developed length, rounded to whole millimetres.
    pub fn total_length_mm(&self, scale: Scale) -> i64 {
        scale.px_to_whole_mm(self.total_length_px())
    }

    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in &self.points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        bounds
    }

    /// Returns a copy shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Polyline {
        Polyline {
            points: self.points.iter().map(|p| p.offset(dx, dy)).collect(),
        }
    }

    /// Replaces one vertex without re-snapping anything.
    ///
    /// Fails if the index is out of range or the move would collapse an edge.
    pub fn with_vertex(&self, index: usize, position: Point) -> crate::Result<Polyline> {
        if index >= self.points.len() {
            return Err(DrawingError::VertexOutOfRange {
                index,
                vertex_count: self.points.len(),
            }
            .into());
        }
        let mut points = self.points.clone();
        points[index] = position;
        Ok(Polyline::new(points)?)
    }

    /// Endpoint and its single neighbour, used to orient end decorations.
    pub fn start_pair(&self) -> (Point, Point) {
        (self.points[0], self.points[1])
    }

    pub fn end_pair(&self) -> (Point, Point) {
        let n = self.points.len();
        (self.points[n - 1], self.points[n - 2])
    }
}

impl TryFrom<Vec<Point>> for Polyline {
    type Error = GeometryError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Polyline::new(points)
    }
}

impl From<Polyline> for Vec<Point> {
    fn from(polyline: Polyline) -> Self {
        polyline.points
    }
}
