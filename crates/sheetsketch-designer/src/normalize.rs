//! Profile normalization.
//!
//! Heuristic smoothing for hand-drawn sheet-metal profiles. The sketch is
//! assumed to loosely depict a regular fabricated part, so near-equal
//! horizontal levels are merged, repeated diagonal cuts are made equal, and
//! edges of the same class with similar lengths are equalized.
//!
//! One round runs these passes in order:
//! 1. horizontal leveling
//! 2. H-D-H-D pattern regularization
//! 3. length equalization per class (H and D)
//! 4. horizontal leveling again, since step 3 can reintroduce small offsets
//!
//! Rounds repeat until a round leaves the profile where it was, so a
//! normalized profile passes through [`normalize_profile`] unchanged.

use serde::{Deserialize, Serialize};
use sheetsketch_core::{
    angle_between, classify_angle, distance, point_from_polar, snap_angle, EdgeClass, Point,
    DEFAULT_SNAP_STEP,
};

/// Thresholds steering the normalizer.
///
/// These are fabrication heuristics rather than physical constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizePolicy {
    /// Maximum `(max - min) / max` spread for a class to be equalized.
    pub equalize_threshold: f64,
    /// Horizontal edges whose mid-heights differ by at most this many pixels
    /// are moved onto a shared level.
    pub level_epsilon_px: f64,
    /// Enables the H-D-H-D diagonal regularization pass.
    pub regularize_patterns: bool,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            equalize_threshold: 0.5,
            level_epsilon_px: 3.0,
            regularize_patterns: true,
        }
    }
}

fn snapped_class(a: Point, b: Point) -> EdgeClass {
    classify_angle(snap_angle(angle_between(a, b), DEFAULT_SNAP_STEP))
}

/// Upper bound on normalization rounds before giving up.
pub const MAX_NORMALIZE_ROUNDS: usize = 16;

/// A round moving no vertex further than this counts as settled.
const SETTLED_EPSILON_PX: f64 = 1e-9;

fn max_displacement(a: &[Point], b: &[Point]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| distance(*p, *q))
        .fold(0.0, f64::max)
}

fn normalize_round(points: &[Point], policy: &NormalizePolicy) -> Vec<Point> {
    let mut out = level_horizontals(points, policy.level_epsilon_px);
    if policy.regularize_patterns {
        out = regularize_hdhd(&out);
    }
    out = equalize_lengths(&out, policy.equalize_threshold);
    level_horizontals(&out, policy.level_epsilon_px)
}

/// Runs normalization rounds over a snapped, bounded polyline.
///
/// Returns the first profile that a further round leaves in place. When the
/// passes keep pulling against each other for [`MAX_NORMALIZE_ROUNDS`]
/// rounds, the input is returned as-is. Either way the result is a fixed
/// point: normalizing it again returns it unchanged.
pub fn normalize_profile(points: &[Point], policy: &NormalizePolicy) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut current = points.to_vec();
    for round in 0..MAX_NORMALIZE_ROUNDS {
        let next = normalize_round(&current, policy);
        if max_displacement(&current, &next) <= SETTLED_EPSILON_PX {
            if round > 0 {
                tracing::trace!("Normalization settled after {} rounds", round);
            }
            return current;
        }
        current = next;
    }

    tracing::debug!(
        "Normalization did not settle after {} rounds; keeping snapped profile",
        MAX_NORMALIZE_ROUNDS
    );
    points.to_vec()
}

struct Level {
    seed_y: f64,
    edges: Vec<usize>,
}

/// Moves horizontal edges with nearby heights onto their group's mean height.
///
/// An edge joins the first group whose seed height (the mid-height of the
/// edge that opened it) is within `epsilon_px`.
pub fn level_horizontals(points: &[Point], epsilon_px: f64) -> Vec<Point> {
    let mut out = points.to_vec();
    let mut levels: Vec<Level> = Vec::new();

    for (i, w) in out.windows(2).enumerate() {
        if classify_angle(angle_between(w[0], w[1])) != EdgeClass::Horizontal {
            continue;
        }
        let y = (w[0].y + w[1].y) / 2.0;
        match levels
            .iter_mut()
            .find(|level| (level.seed_y - y).abs() <= epsilon_px)
        {
            Some(level) => level.edges.push(i),
            None => levels.push(Level {
                seed_y: y,
                edges: vec![i],
            }),
        }
    }

    for level in &levels {
        let sum: f64 = level
            .edges
            .iter()
            .map(|&i| out[i].y + out[i + 1].y)
            .sum();
        let mean = sum / (level.edges.len() * 2) as f64;
        for &i in &level.edges {
            out[i].y = mean;
            out[i + 1].y = mean;
        }
    }
    out
}

/// Equalizes the two diagonals of every `H, D, H, D` edge window.
///
/// Both diagonals are rebuilt at their mean length in their snapped
/// direction; the horizontal between them is carried along unchanged and
/// every vertex after the window moves with the window's last vertex.
/// Windows do not overlap: scanning resumes after the last edge of a
/// matched window.
pub fn regularize_hdhd(points: &[Point]) -> Vec<Point> {
    let mut out = points.to_vec();
    if out.len() < 5 {
        return out;
    }

    let mut i = 0;
    while i + 4 < out.len() {
        let (a, b, c, d, e) = (out[i], out[i + 1], out[i + 2], out[i + 3], out[i + 4]);
        let pattern = [
            snapped_class(a, b),
            snapped_class(b, c),
            snapped_class(c, d),
            snapped_class(d, e),
        ];
        if pattern
            != [
                EdgeClass::Horizontal,
                EdgeClass::Diagonal,
                EdgeClass::Horizontal,
                EdgeClass::Diagonal,
            ]
        {
            i += 1;
            continue;
        }

        let target = (distance(b, c) + distance(d, e)) / 2.0;
        let new_c = point_from_polar(b, target, snap_angle(angle_between(b, c), DEFAULT_SNAP_STEP));
        let new_d = new_c.offset(d.x - c.x, d.y - c.y);
        let new_e = point_from_polar(
            new_d,
            target,
            snap_angle(angle_between(d, e), DEFAULT_SNAP_STEP),
        );
        let (dx, dy) = (new_e.x - e.x, new_e.y - e.y);

        out[i + 2] = new_c;
        out[i + 3] = new_d;
        out[i + 4] = new_e;
        for p in out.iter_mut().skip(i + 5) {
            *p = p.offset(dx, dy);
        }
        tracing::trace!("Regularized H-D-H-D window at edge {} to {:.1}px", i, target);
        i += 4;
    }
    out
}

/// Equalizes edge lengths within the H class and within the D class.
///
/// A class is equalized when it has at least two edges and the spread
/// `(max - min) / max` is at most `threshold`. The polyline is then rebuilt
/// from its first point using the snapped directions.
pub fn equalize_lengths(points: &[Point], threshold: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut lengths: Vec<f64> = Vec::with_capacity(points.len() - 1);
    let mut angles: Vec<f64> = Vec::with_capacity(points.len() - 1);
    let mut classes: Vec<EdgeClass> = Vec::with_capacity(points.len() - 1);
    for w in points.windows(2) {
        let angle = snap_angle(angle_between(w[0], w[1]), DEFAULT_SNAP_STEP);
        lengths.push(distance(w[0], w[1]));
        angles.push(angle);
        classes.push(classify_angle(angle));
    }

    for class in [EdgeClass::Horizontal, EdgeClass::Diagonal] {
        let members: Vec<usize> = (0..classes.len()).filter(|&i| classes[i] == class).collect();
        if members.len() < 2 {
            continue;
        }
        let min = members.iter().map(|&i| lengths[i]).fold(f64::INFINITY, f64::min);
        let max = members.iter().map(|&i| lengths[i]).fold(0.0, f64::max);
        if max > 0.0 && (max - min) / max <= threshold {
            let mean = members.iter().map(|&i| lengths[i]).sum::<f64>() / members.len() as f64;
            for &i in &members {
                lengths[i] = mean;
            }
        }
    }

    let mut rebuilt = Vec::with_capacity(points.len());
    rebuilt.push(points[0]);
    for (len, angle) in lengths.iter().zip(&angles) {
        let anchor = rebuilt[rebuilt.len() - 1];
        rebuilt.push(point_from_polar(anchor, *len, *angle));
    }
    rebuilt
}
