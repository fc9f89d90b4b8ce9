//! Paint side marking and colour catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

use sheetsketch_core::{angle_between, normalize_degrees, DrawingError, Point};

use crate::polyline::Bounds;

/// Colour used until the user picks one.
pub const DEFAULT_PAINT_COLOR: &str = "#2f7d32";
/// Label used until the user picks one.
pub const DEFAULT_PAINT_LABEL: &str = "RR23";
/// Distance between the polyline's bounding box and the paint badge.
pub const BADGE_OFFSET_PX: f64 = 28.0;

/// Side of the sheet that receives the paint coat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaintSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for PaintSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaintSide::Top => "TOP",
            PaintSide::Bottom => "BOTTOM",
            PaintSide::Left => "LEFT",
            PaintSide::Right => "RIGHT",
        };
        write!(f, "{}", name)
    }
}

/// Buckets a screen-space direction into a side.
///
/// Sectors are 90° wide and include their lower bound:
/// `[315, 45)` right, `[45, 135)` bottom, `[135, 225)` left, `[225, 315)` top.
pub fn side_from_angle(deg: f64) -> PaintSide {
    let a = normalize_degrees(deg);
    if !(45.0..315.0).contains(&a) {
        PaintSide::Right
    } else if a < 135.0 {
        PaintSide::Bottom
    } else if a < 225.0 {
        PaintSide::Left
    } else {
        PaintSide::Top
    }
}

/// Side pointed at by an arrow drawn from `start` to `end`.
pub fn side_from_arrow(start: Point, end: Point) -> PaintSide {
    side_from_angle(angle_between(start, end))
}

/// An entry of the colour catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub code: &'static str,
    pub name: &'static str,
    pub hex: &'static str,
}

const fn color(code: &'static str, name: &'static str, hex: &'static str) -> PaletteColor {
    PaletteColor { code, name, hex }
}

/// Standard coil-coating colours offered in the paint picker.
pub static RR_PALETTE: [PaletteColor; 24] = [
    color("RR11", "RR11 spruce green", "#114F38"),
    color("RR20", "RR20 white", "#EDEAE3"),
    color("RR21", "RR21 light grey", "#C0C5C9"),
    color("RR22", "RR22 grey", "#A9B0B5"),
    color("RR23", "RR23 dark grey", "#565B58"),
    color("RR24", "RR24 light yellow", "#E6C660"),
    color("RR25", "RR25 yellow", "#F0BE27"),
    color("RR28", "RR28 dark red", "#7A0810"),
    color("RR29", "RR29 red", "#8D0E1A"),
    color("RR30", "RR30 light brown", "#D6CDBF"),
    color("RR31", "RR31 brown", "#5F4A3D"),
    color("RR32", "RR32 dark brown", "#3F351A"),
    color("RR33", "RR33 black", "#0B0B0B"),
    color("RR34", "RR34 light blue", "#789CA8"),
    color("RR35", "RR35 blue", "#1F3F5F"),
    color("RR36", "RR36 light green", "#8DB179"),
    color("RR37", "RR37 green", "#395938"),
    color("RR40", "RR40 silver", "#B4B4B4"),
    color("RR41", "RR41 dark silver", "#616D79"),
    color("RR42", "RR42 gold", "#B79A6B"),
    color("RR43", "RR43 copper", "#8D6B2E"),
    color("RR44", "RR44 metallic blue", "#586470"),
    color("RR750", "RR750 brick red", "#7C3F1D"),
    color("RAL5011", "RAL5011 steel blue", "#1E2230"),
];

/// RAL codes accepted as free text.
pub static RAL_COLORS: [(&str, &str); 8] = [
    ("RAL7016", "#383E42"),
    ("RAL7021", "#2F3438"),
    ("RAL7024", "#45494E"),
    ("RAL7035", "#D7D7D7"),
    ("RAL8004", "#8E402A"),
    ("RAL3009", "#6D3B3C"),
    ("RAL9005", "#0A0A0A"),
    ("RAL9010", "#F2F2F2"),
];

/// Resolves a colour code, case-insensitively, to `(code, hex)`.
///
/// The RR catalogue is searched first, then the RAL table.
pub fn lookup_color(code: &str) -> Option<(&'static str, &'static str)> {
    let wanted = code.trim().to_ascii_uppercase();
    RR_PALETTE
        .iter()
        .find(|c| c.code == wanted)
        .map(|c| (c.code, c.hex))
        .or_else(|| {
            RAL_COLORS
                .iter()
                .find(|(ral, _)| *ral == wanted)
                .copied()
        })
}

/// Returns true for `#RRGGBB` strings.
pub fn is_valid_hex(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// The single paint marking of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintMarking {
    pub side: Option<PaintSide>,
    pub color_hex: String,
    pub label: String,
    pub locked: bool,
}

impl Default for PaintMarking {
    fn default() -> Self {
        Self {
            side: None,
            color_hex: DEFAULT_PAINT_COLOR.to_string(),
            label: DEFAULT_PAINT_LABEL.to_string(),
            locked: false,
        }
    }
}

impl PaintMarking {
    pub fn new() -> Self {
        Self::default()
    }

    /// An open marking pre-set to `color_hex` and `label`.
    ///
    /// An invalid colour or an empty label falls back to the built-in default.
    pub fn with_defaults(color_hex: &str, label: &str) -> Self {
        let mut paint = Self::default();
        if is_valid_hex(color_hex) {
            paint.color_hex = color_hex.to_string();
        }
        if !label.trim().is_empty() {
            paint.label = label.trim().to_string();
        }
        paint
    }

    /// Sets the side from an arrow while the marking is open.
    pub fn aim(&mut self, start: Point, end: Point) -> Result<PaintSide, DrawingError> {
        if self.locked {
            return Err(DrawingError::PaintLocked);
        }
        let side = side_from_arrow(start, end);
        self.side = Some(side);
        Ok(side)
    }

    /// Stores colour and label and locks the marking.
    ///
    /// A colour that is not `#RRGGBB` leaves the previous colour in place.
    /// Fails with [`DrawingError::NoPaintSide`] until a side has been aimed.
    pub fn commit(&mut self, color_hex: &str, label: &str) -> Result<(), DrawingError> {
        self.check_committable()?;
        if is_valid_hex(color_hex) {
            self.color_hex = color_hex.to_string();
        } else {
            tracing::warn!("Ignoring invalid paint colour {:?}", color_hex);
        }
        let label = label.trim();
        if !label.is_empty() {
            self.label = label.to_string();
        }
        self.locked = true;
        tracing::info!("Paint locked: {:?} {} {}", self.side, self.label, self.color_hex);
        Ok(())
    }

    /// Commits a catalogue or RAL code. Unknown codes change nothing.
    ///
    /// Returns whether the code was recognised.
    pub fn commit_code(&mut self, code: &str) -> Result<bool, DrawingError> {
        self.check_committable()?;
        match lookup_color(code) {
            Some((code, hex)) => {
                self.commit(hex, code)?;
                Ok(true)
            }
            None => {
                tracing::warn!("Unknown paint code {:?}", code);
                Ok(false)
            }
        }
    }

    fn check_committable(&self) -> Result<(), DrawingError> {
        if self.locked {
            return Err(DrawingError::PaintLocked);
        }
        if self.side.is_none() {
            return Err(DrawingError::NoPaintSide);
        }
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Where the paint badge goes for a drawing with the given bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgePlacement {
    /// Badge anchor, outside the bounding box.
    pub anchor: Point,
    /// Point on the bounding box the leader line runs to.
    pub leader_target: Point,
}

/// Places the badge [`BADGE_OFFSET_PX`] outside `bounds` on `side`,
/// centred along that side.
pub fn badge_placement(bounds: &Bounds, side: PaintSide) -> BadgePlacement {
    let center = bounds.center();
    let (anchor, leader_target) = match side {
        PaintSide::Top => (
            Point::new(center.x, bounds.min_y - BADGE_OFFSET_PX),
            Point::new(center.x, bounds.min_y),
        ),
        PaintSide::Bottom => (
            Point::new(center.x, bounds.max_y + BADGE_OFFSET_PX),
            Point::new(center.x, bounds.max_y),
        ),
        PaintSide::Left => (
            Point::new(bounds.min_x - BADGE_OFFSET_PX, center.y),
            Point::new(bounds.min_x, center.y),
        ),
        PaintSide::Right => (
            Point::new(bounds.max_x + BADGE_OFFSET_PX, center.y),
            Point::new(bounds.max_x, center.y),
        ),
    };
    BadgePlacement {
        anchor,
        leader_target,
    }
}
