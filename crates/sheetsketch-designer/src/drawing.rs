//! Saved drawing artifact.
//!
//! This is the record handed to order and export collaborators. Keys are
//! camelCase so the JSON matches what those collaborators already read.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use sheetsketch_core::{Point, Scale};

use crate::decoration::DecorationSet;
use crate::paint::{PaintMarking, PaintSide};
use crate::polyline::Polyline;

fn default_quantity() -> u32 {
    1
}

/// Coerces a requested quantity to at least one piece.
pub fn coerce_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, u32::MAX as i64) as u32
}

/// A finished sketch with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: String,
    pub points: Vec<Point>,
    #[serde(default)]
    pub decorations: DecorationSet,
    pub paint_side: Option<PaintSide>,
    pub paint_color: String,
    pub paint_label: String,
    /// `round(Σ edge length px × mm_per_px)`
    #[serde(rename = "totalLengthMM")]
    pub total_length_mm: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Drawing {
    /// Builds an artifact from the committed geometry and its annotations.
    pub fn new(
        polyline: &Polyline,
        decorations: DecorationSet,
        paint: &PaintMarking,
        scale: Scale,
    ) -> Self {
        Self {
            id: format!("drawing_{}", Uuid::new_v4()),
            points: polyline.points().to_vec(),
            decorations,
            paint_side: paint.side,
            paint_color: paint.color_hex.clone(),
            paint_label: paint.label.clone(),
            total_length_mm: polyline.total_length_mm(scale),
            quantity: default_quantity(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = coerce_quantity(quantity);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Validated geometry of the drawing.
    pub fn polyline(&self) -> crate::Result<Polyline> {
        Ok(Polyline::new(self.points.clone())?)
    }

    /// Paint marking as stored; a marking with a side was committed and
    /// therefore comes back locked.
    pub fn paint_marking(&self) -> PaintMarking {
        PaintMarking {
            side: self.paint_side,
            color_hex: self.paint_color.clone(),
            label: self.paint_label.clone(),
            locked: self.paint_side.is_some(),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an artifact. A stored quantity of zero is read as one.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut drawing: Drawing = serde_json::from_str(json)?;
        drawing.quantity = drawing.quantity.max(1);
        Ok(drawing)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json().context("Failed to serialize drawing")?;
        std::fs::write(path.as_ref(), json).context("Failed to write drawing file")?;
        tracing::info!("Saved drawing {} to {}", self.id, path.as_ref().display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read drawing file")?;
        let drawing = Self::from_json(&content).context("Failed to parse drawing file")?;
        Ok(drawing)
    }
}
