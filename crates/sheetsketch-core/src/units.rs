//! Pixel/millimetre scale handling
//!
//! The sketch surface works in device pixels; everything shown to the user
//! or handed to fabrication is in millimetres. [`Scale`] carries the single
//! `mm_per_px` ratio and keeps it inside its supported range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted millimetres-per-pixel ratio.
pub const MIN_MM_PER_PX: f64 = 0.05;
/// Largest accepted millimetres-per-pixel ratio.
pub const MAX_MM_PER_PX: f64 = 10.0;
/// Ratio used until the user picks another one.
pub const DEFAULT_MM_PER_PX: f64 = 0.5;

/// Millimetres-per-pixel ratio, always within `[0.05, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Scale {
    mm_per_px: f64,
}

impl Scale {
    /// Creates a scale, clamping out-of-range values.
    ///
    /// Non-finite input falls back to the default ratio.
    pub fn new(mm_per_px: f64) -> Self {
        let mut scale = Self::default();
        scale.set(mm_per_px);
        scale
    }

    pub fn mm_per_px(&self) -> f64 {
        self.mm_per_px
    }

    /// Updates the ratio. Values are clamped; non-finite input is ignored.
    ///
    /// Returns the ratio now in effect.
    pub fn set(&mut self, mm_per_px: f64) -> f64 {
        if mm_per_px.is_finite() {
            self.mm_per_px = mm_per_px.clamp(MIN_MM_PER_PX, MAX_MM_PER_PX);
        } else {
            tracing::warn!("Ignoring non-finite scale {}", mm_per_px);
        }
        self.mm_per_px
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        px * self.mm_per_px
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        mm / self.mm_per_px
    }

    /// Converts a pixel length to whole millimetres.
    pub fn px_to_whole_mm(&self, px: f64) -> i64 {
        self.px_to_mm(px).round() as i64
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            mm_per_px: DEFAULT_MM_PER_PX,
        }
    }
}

impl From<f64> for Scale {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(value: Scale) -> Self {
        value.mm_per_px
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1px = {} mm", self.mm_per_px)
    }
}

/// Parses a user-entered number.
///
/// Accepts a comma as decimal separator. Empty, non-numeric and non-finite
/// input yields `None` so callers can keep their current value.
pub fn parse_number(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Formats a millimetre length for display, rounded to whole millimetres.
pub fn format_length_mm(value_mm: f64) -> String {
    format!("{} mm", value_mm.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_clamps() {
        assert_eq!(Scale::new(0.0).mm_per_px(), MIN_MM_PER_PX);
        assert_eq!(Scale::new(100.0).mm_per_px(), MAX_MM_PER_PX);
        assert_eq!(Scale::new(1.5).mm_per_px(), 1.5);
    }

    #[test]
    fn test_scale_ignores_non_finite() {
        let mut scale = Scale::new(2.0);
        assert_eq!(scale.set(f64::NAN), 2.0);
        assert_eq!(scale.set(f64::INFINITY), 2.0);
        assert_eq!(Scale::new(f64::NAN).mm_per_px(), DEFAULT_MM_PER_PX);
    }

    #[test]
    fn test_conversions() {
        let scale = Scale::default();
        assert_eq!(scale.px_to_mm(100.0), 50.0);
        assert_eq!(scale.mm_to_px(50.0), 100.0);
        assert_eq!(scale.px_to_whole_mm(101.0), 51);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("140"), Some(140.0));
        assert_eq!(parse_number(" 12,5 "), Some(12.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_scale_serde_clamps_on_load() {
        let scale: Scale = serde_json::from_str("25.0").unwrap();
        assert_eq!(scale.mm_per_px(), MAX_MM_PER_PX);
        assert_eq!(serde_json::to_string(&Scale::default()).unwrap(), "0.5");
    }
}
