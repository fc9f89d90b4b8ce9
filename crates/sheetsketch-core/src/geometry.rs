//! Planar geometry primitives
//!
//! All coordinates are in input-device pixel space: x grows to the right and
//! y grows downward. Angles are in degrees, measured from the +x axis and
//! growing toward +y, and are reported in `[0, 360)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default angular step used when snapping edge directions.
pub const DEFAULT_SNAP_STEP: f64 = 45.0;

/// Two points closer than this are treated as coincident.
pub const COINCIDENT_EPSILON: f64 = 1e-9;

/// A 2-D coordinate in device pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn coincides_with(&self, other: &Point) -> bool {
        distance(*self, *other) <= COINCIDENT_EPSILON
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Direction class of an edge, used to pick a normalization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeClass {
    /// 0° or 180°
    #[serde(rename = "H")]
    Horizontal,
    /// 90° or 270°
    #[serde(rename = "V")]
    Vertical,
    /// Anything else
    #[serde(rename = "D")]
    Diagonal,
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "H"),
            Self::Vertical => write!(f, "V"),
            Self::Diagonal => write!(f, "D"),
        }
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Direction of the vector `a -> b` in degrees, in `[0, 360)`.
///
/// Coincident points yield 0°.
pub fn angle_between(a: Point, b: Point) -> f64 {
    normalize_degrees((b.y - a.y).atan2(b.x - a.x).to_degrees())
}

/// Rounds `deg` to the nearest multiple of `step` and wraps the result.
///
/// Ties round half away from zero on the quotient `deg / step`.
pub fn snap_angle(deg: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return normalize_degrees(deg);
    }
    normalize_degrees((deg / step).round() * step)
}

/// Projects `length` along direction `deg` from `origin`.
pub fn point_from_polar(origin: Point, length: f64, deg: f64) -> Point {
    let rad = deg.to_radians();
    Point::new(origin.x + rad.cos() * length, origin.y + rad.sin() * length)
}

/// Classifies a direction after rounding it to the nearest whole degree.
pub fn classify_angle(deg: f64) -> EdgeClass {
    let whole = normalize_degrees(deg.round()) as i64 % 360;
    if whole % 180 == 0 {
        EdgeClass::Horizontal
    } else if whole % 90 == 0 {
        EdgeClass::Vertical
    } else {
        EdgeClass::Diagonal
    }
}

/// Circular distance between two directions, in `[0, 180]`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// A zero-length chord has no direction; the distance is reported as 0.
pub fn perpendicular_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let chord = dx.hypot(dy);
    if chord <= COINCIDENT_EPSILON {
        return 0.0;
    }
    (dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs() / chord
}
