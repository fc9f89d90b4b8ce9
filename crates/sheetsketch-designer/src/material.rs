//! Sheet blank estimate for an order line.

use serde::{Deserialize, Serialize};
use sheetsketch_core::DrawingError;

/// Stock sheet dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankSize {
    pub length_mm: u32,
    pub width_mm: u32,
}

impl BlankSize {
    pub const fn new(length_mm: u32, width_mm: u32) -> Self {
        Self {
            length_mm,
            width_mm,
        }
    }
}

impl Default for BlankSize {
    fn default() -> Self {
        BLANK_PRESETS[0]
    }
}

/// Common stock sizes: 6 m × 1.25 m, 3 m × 1.25 m, 2 m × 1 m.
pub const BLANK_PRESETS: [BlankSize; 3] = [
    BlankSize::new(6000, 1250),
    BlankSize::new(3000, 1250),
    BlankSize::new(2000, 1000),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCalculation {
    #[serde(rename = "blankLengthMM")]
    pub blank_length_mm: u32,
    #[serde(rename = "blankWidthMM")]
    pub blank_width_mm: u32,
    #[serde(rename = "drawingLengthMM")]
    pub drawing_length_mm: i64,
    pub quantity: u32,
    pub max_pieces_per_blank: u32,
    pub blanks_needed: u32,
    #[serde(rename = "totalAreaM2")]
    pub total_area_m2: f64,
    pub waste_percentage: f64,
}

impl MaterialCalculation {
    /// Estimates how many blanks `quantity` pieces of `drawing_length_mm` need.
    ///
    /// Pieces are laid end to end along the blank length. A drawing with no
    /// length, or one longer than the blank, cannot be cut from it.
    pub fn estimate(
        blank: BlankSize,
        drawing_length_mm: i64,
        quantity: u32,
    ) -> Result<Self, DrawingError> {
        let blank_len = blank.length_mm as i64;
        if drawing_length_mm <= 0 || drawing_length_mm > blank_len {
            return Err(DrawingError::DoesNotFitBlank {
                part_mm: drawing_length_mm,
                blank_mm: blank.length_mm,
            });
        }
        let quantity = quantity.max(1);
        let per_blank = (blank_len / drawing_length_mm) as u32;
        let blanks_needed = quantity.div_ceil(per_blank);
        let total_area_m2 =
            blank.length_mm as f64 * blank.width_mm as f64 * blanks_needed as f64 / 1_000_000.0;

        let capacity = per_blank * blanks_needed;
        let used = quantity.min(capacity);
        let waste_percentage = (capacity - used) as f64 / capacity as f64 * 100.0;

        Ok(Self {
            blank_length_mm: blank.length_mm,
            blank_width_mm: blank.width_mm,
            drawing_length_mm,
            quantity,
            max_pieces_per_blank: per_blank,
            blanks_needed,
            total_area_m2,
            waste_percentage,
        })
    }
}
