//! End decorations: hems and creases attached to the first or last vertex.
//!
//! A decoration only records where it sits and what it is. Its outline is
//! derived from the endpoint and its neighbour every time it is needed, so it
//! follows the polyline through later edits.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use sheetsketch_core::{
    angle_between, point_from_polar, snap_angle, DrawingError, Point, Scale, DEFAULT_SNAP_STEP,
};

use crate::polyline::Polyline;

/// Maximum number of decorations on a single endpoint.
pub const MAX_DECORATIONS_PER_END: usize = 4;

/// Opening angle between the edge and a decoration's first leg.
const LEG_OFFSET_DEG: f64 = 30.0;
/// Turn from the first to the second leg of a closed hem.
const HEM_RETURN_DEG: f64 = 160.0;
/// Second leg of a closed hem relative to the first.
const HEM_RETURN_RATIO: f64 = 0.7;
/// Extra skew applied to creases.
const CREASE_SKEW_DEG: f64 = 15.0;

/// Which end of the polyline a decoration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndPosition {
    Start,
    End,
}

impl EndPosition {
    /// `+1` for the start, `-1` for the end.
    fn direction(self) -> f64 {
        match self {
            EndPosition::Start => 1.0,
            EndPosition::End => -1.0,
        }
    }
}

impl fmt::Display for EndPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndPosition::Start => write!(f, "start"),
            EndPosition::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecorationKind {
    /// Edge folded back flat onto itself
    HemClosed,
    /// Edge folded back leaving a gap
    HemOpen,
    /// Short stiffening bend
    Crease,
}

impl fmt::Display for DecorationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecorationKind::HemClosed => "closed hem",
            DecorationKind::HemOpen => "open hem",
            DecorationKind::Crease => "crease",
        };
        write!(f, "{}", name)
    }
}

/// Fold length of a decoration: 5 or 10 mm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FoldSize {
    Mm5,
    Mm10,
}

impl FoldSize {
    pub fn mm(self) -> u32 {
        match self {
            FoldSize::Mm5 => 5,
            FoldSize::Mm10 => 10,
        }
    }
}

impl TryFrom<u32> for FoldSize {
    type Error = DrawingError;

    fn try_from(size_mm: u32) -> Result<Self, Self::Error> {
        match size_mm {
            5 => Ok(FoldSize::Mm5),
            10 => Ok(FoldSize::Mm10),
            _ => Err(DrawingError::InvalidSize { size_mm }),
        }
    }
}

impl From<FoldSize> for u32 {
    fn from(size: FoldSize) -> Self {
        size.mm()
    }
}

/// One decoration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decoration {
    #[serde(rename = "pos", alias = "position")]
    pub position: EndPosition,
    pub kind: DecorationKind,
    #[serde(rename = "sizeMM")]
    pub size: FoldSize,
}

impl Decoration {
    pub fn new(position: EndPosition, kind: DecorationKind, size: FoldSize) -> Self {
        Self {
            position,
            kind,
            size,
        }
    }

    pub fn size_mm(&self) -> u32 {
        self.size.mm()
    }
}

/// A labelled entry of the decoration menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationPreset {
    pub label: &'static str,
    pub kind: DecorationKind,
    pub size: FoldSize,
}

impl DecorationPreset {
    pub fn at(&self, position: EndPosition) -> Decoration {
        Decoration::new(position, self.kind, self.size)
    }
}

/// Menu offered when an endpoint is clicked, in display order.
pub const DECORATION_PRESETS: [DecorationPreset; 5] = [
    DecorationPreset {
        label: "Closed hem 10 mm",
        kind: DecorationKind::HemClosed,
        size: FoldSize::Mm10,
    },
    DecorationPreset {
        label: "Open hem 5 mm",
        kind: DecorationKind::HemOpen,
        size: FoldSize::Mm5,
    },
    DecorationPreset {
        label: "Crease 5 mm",
        kind: DecorationKind::Crease,
        size: FoldSize::Mm5,
    },
    DecorationPreset {
        label: "Crease 10 mm",
        kind: DecorationKind::Crease,
        size: FoldSize::Mm10,
    },
    DecorationPreset {
        label: "Closed hem 5 mm",
        kind: DecorationKind::HemClosed,
        size: FoldSize::Mm5,
    },
];

/// Decorations of one drawing, in insertion order.
///
/// Deserializing goes through [`DecorationSet::add`], so a stored list with
/// more than [`MAX_DECORATIONS_PER_END`] on one endpoint is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Decoration>", into = "Vec<Decoration>")]
pub struct DecorationSet {
    items: SmallVec<[Decoration; 4]>,
}

impl DecorationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decoration, refusing a fifth one on the same endpoint.
    pub fn add(&mut self, decoration: Decoration) -> Result<usize, DrawingError> {
        if self.count_at(decoration.position) >= MAX_DECORATIONS_PER_END {
            return Err(DrawingError::DecorationLimit {
                position: decoration.position.to_string(),
                limit: MAX_DECORATIONS_PER_END,
            });
        }
        self.items.push(decoration);
        Ok(self.items.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Result<Decoration, DrawingError> {
        if index >= self.items.len() {
            return Err(DrawingError::DecorationOutOfRange { index });
        }
        Ok(self.items.remove(index))
    }

    /// Removes every decoration on `position`; returns how many went.
    pub fn clear_at(&mut self, position: EndPosition) -> usize {
        let before = self.items.len();
        self.items.retain(|d| d.position != position);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn count_at(&self, position: EndPosition) -> usize {
        self.at(position).count()
    }

    pub fn at(&self, position: EndPosition) -> impl Iterator<Item = &Decoration> + '_ {
        self.items.iter().filter(move |d| d.position == position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Decoration> {
        self.items.to_vec()
    }
}

impl FromIterator<Decoration> for DecorationSet {
    fn from_iter<I: IntoIterator<Item = Decoration>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<Decoration>> for DecorationSet {
    type Error = DrawingError;

    fn try_from(decorations: Vec<Decoration>) -> Result<Self, Self::Error> {
        let mut set = Self::new();
        for decoration in decorations {
            set.add(decoration)?;
        }
        Ok(set)
    }
}

impl From<DecorationSet> for Vec<Decoration> {
    fn from(set: DecorationSet) -> Self {
        set.items.into_vec()
    }
}

/// Outline of `decoration` on `polyline`, in pixels, starting at the endpoint.
///
/// With `p` the endpoint, `q` its neighbour and `base` the fold size in
/// pixels, the first leg leaves `p` at `snap(angle(p, q) ± 180 - 30)`.
pub fn decoration_outline(polyline: &Polyline, decoration: &Decoration, scale: Scale) -> Vec<Point> {
    let (p, q) = match decoration.position {
        EndPosition::Start => polyline.start_pair(),
        EndPosition::End => polyline.end_pair(),
    };
    let dir = decoration.position.direction();
    let base = scale.mm_to_px(decoration.size_mm() as f64);
    let a1 = snap_angle(
        angle_between(p, q) + dir * 180.0 - LEG_OFFSET_DEG,
        DEFAULT_SNAP_STEP,
    );

    match decoration.kind {
        DecorationKind::HemClosed => {
            let p2 = point_from_polar(p, base, a1);
            let p3 = point_from_polar(p2, base * HEM_RETURN_RATIO, a1 + HEM_RETURN_DEG);
            vec![p, p2, p3]
        }
        DecorationKind::HemOpen => vec![p, point_from_polar(p, base, a1)],
        DecorationKind::Crease => {
            let skewed = a1 - dir * CREASE_SKEW_DEG;
            vec![p, point_from_polar(p, base, skewed)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsketch_core::distance;

    fn bar() -> Polyline {
        Polyline::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_wire_format() {
        let d = Decoration::new(EndPosition::Start, DecorationKind::HemClosed, FoldSize::Mm10);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"pos":"start","kind":"HEM_CLOSED","sizeMM":10}"#);

        let alias: Decoration =
            serde_json::from_str(r#"{"position":"end","kind":"CREASE","sizeMM":5}"#).unwrap();
        assert_eq!(alias.position, EndPosition::End);
        assert_eq!(alias.size, FoldSize::Mm5);

        assert!(
            serde_json::from_str::<Decoration>(r#"{"pos":"end","kind":"CREASE","sizeMM":7}"#)
                .is_err()
        );
    }

    #[test]
    fn test_limit_per_end() {
        let mut set = DecorationSet::new();
        let hem = DECORATION_PRESETS[0];
        for _ in 0..MAX_DECORATIONS_PER_END {
            set.add(hem.at(EndPosition::Start)).unwrap();
        }
        assert!(matches!(
            set.add(hem.at(EndPosition::Start)),
            Err(DrawingError::DecorationLimit { limit: 4, .. })
        ));
        // the other end is unaffected
        assert!(set.add(hem.at(EndPosition::End)).is_ok());
    }

    #[test]
    fn test_stored_list_respects_limit() {
        let crease = r#"{"pos":"start","kind":"CREASE","sizeMM":5}"#;
        let four = format!("[{}]", vec![crease; 4].join(","));
        let set: DecorationSet = serde_json::from_str(&four).unwrap();
        assert_eq!(set.count_at(EndPosition::Start), 4);
        assert_eq!(serde_json::to_string(&set).unwrap(), four);

        let five = format!("[{}]", vec![crease; 5].join(","));
        let err = serde_json::from_str::<DecorationSet>(&five).unwrap_err();
        assert!(err.to_string().contains("already carries 4 decorations"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set: DecorationSet = DECORATION_PRESETS
            .iter()
            .enumerate()
            .map(|(i, p)| {
                p.at(if i % 2 == 0 {
                    EndPosition::Start
                } else {
                    EndPosition::End
                })
            })
            .collect();
        assert_eq!(set.count_at(EndPosition::Start), 3);
        assert_eq!(set.clear_at(EndPosition::Start), 3);
        assert_eq!(set.len(), 2);
        assert!(set.remove(5).is_err());
        let removed = set.remove(0).unwrap();
        assert_eq!(removed.kind, DecorationKind::HemOpen);
    }

    #[test]
    fn test_open_hem_outline() {
        let d = Decoration::new(EndPosition::Start, DecorationKind::HemOpen, FoldSize::Mm5);
        let outline = decoration_outline(&bar(), &d, Scale::default());
        assert_eq!(outline.len(), 2);
        // angle(p,q) = 0 -> 0 + 180 - 30 = 150 -> snapped to 135
        let leg = angle_between(outline[0], outline[1]);
        assert!((leg - 135.0).abs() < 1e-9);
        assert!((distance(outline[0], outline[1]) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_closed_hem_and_crease_at_end() {
        let poly = bar();
        let hem = Decoration::new(EndPosition::End, DecorationKind::HemClosed, FoldSize::Mm10);
        let outline = decoration_outline(&poly, &hem, Scale::default());
        assert_eq!(outline[0], Point::new(100.0, 0.0));
        // angle(p,q) = 180 -> 180 - 180 - 30 = -30 -> snapped to 315
        assert!((angle_between(outline[0], outline[1]) - 315.0).abs() < 1e-9);
        assert!((distance(outline[1], outline[2]) - 14.0).abs() < 1e-9);

        let crease = Decoration::new(EndPosition::End, DecorationKind::Crease, FoldSize::Mm10);
        let outline = decoration_outline(&poly, &crease, Scale::default());
        assert!((angle_between(outline[0], outline[1]) - 330.0).abs() < 1e-9);
    }
}
