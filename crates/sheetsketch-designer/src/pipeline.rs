//! Stroke straightening pipeline.
//!
//! ```text
//! raw stroke -> simplify -> snap -> merge -> bound -> normalize -> polyline
//! ```
//!
//! Each stage is a pure function in its own module and can be run on its
//! own; [`straighten`] chains them in the fixed order above.

use serde::{Deserialize, Serialize};
use sheetsketch_core::{Point, DEFAULT_SNAP_STEP};

use crate::bound::{bound_segments, DEFAULT_MAX_SEGMENTS};
use crate::merge::{merge_collinear, DEFAULT_MERGE_TOLERANCE_DEG};
use crate::normalize::{normalize_profile, NormalizePolicy};
use crate::polyline::Polyline;
use crate::simplify::{douglas_peucker, DEFAULT_TOLERANCE_PX};
use crate::snap::snap_polyline;

/// Parameters for [`straighten`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Douglas–Peucker tolerance in pixels
    pub tolerance_px: f64,
    /// Angle grid in degrees
    pub snap_step_deg: f64,
    /// Collinearity tolerance in degrees
    pub merge_tolerance_deg: f64,
    /// Maximum number of edges
    pub max_segments: usize,
    pub normalize: NormalizePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tolerance_px: DEFAULT_TOLERANCE_PX,
            snap_step_deg: DEFAULT_SNAP_STEP,
            merge_tolerance_deg: DEFAULT_MERGE_TOLERANCE_DEG,
            max_segments: DEFAULT_MAX_SEGMENTS,
            normalize: NormalizePolicy::default(),
        }
    }
}

/// Output of every stage, kept for inspection and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineTrace {
    pub simplified: Vec<Point>,
    pub snapped: Vec<Point>,
    pub merged: Vec<Point>,
    pub bounded: Vec<Point>,
    pub bound_iterations: usize,
    pub normalized: Vec<Point>,
}

/// Runs every stage and returns all intermediate results.
pub fn run_stages(raw: &[Point], config: &PipelineConfig) -> PipelineTrace {
    let simplified = douglas_peucker(raw, config.tolerance_px);
    let snapped = snap_polyline(&simplified, config.snap_step_deg);
    let merged = merge_collinear(&snapped, config.merge_tolerance_deg);
    let bound = bound_segments(
        &merged,
        config.max_segments,
        config.snap_step_deg,
        config.merge_tolerance_deg,
    );
    let normalized = normalize_profile(&bound.points, &config.normalize);

    tracing::debug!(
        raw = raw.len(),
        simplified = simplified.len(),
        merged = merged.len(),
        bounded = bound.points.len(),
        "Straightened stroke"
    );

    PipelineTrace {
        simplified,
        snapped,
        merged,
        bounded: bound.points,
        bound_iterations: bound.iterations,
        normalized,
    }
}

/// Converts a raw stroke into a committed polyline.
///
/// Returns `None` for strokes with fewer than two points, and for strokes
/// whose result degenerates (for instance a closed scribble that collapses
/// onto its start point).
pub fn straighten(raw: &[Point], config: &PipelineConfig) -> Option<Polyline> {
    if raw.len() < 2 {
        tracing::debug!("Discarding stroke with {} points", raw.len());
        return None;
    }
    let trace = run_stages(raw, config);
    let mut settled = trace.normalized;
    // drop vertices left stacked on their neighbour; fewer vertices means the
    // normalizer has to settle the profile again
    loop {
        let cleaned = merge_collinear(&settled, 0.0);
        if cleaned.len() == settled.len() {
            break;
        }
        settled = normalize_profile(&cleaned, &config.normalize);
    }
    match Polyline::new(settled) {
        Ok(polyline) => Some(polyline),
        Err(err) => {
            tracing::warn!("Discarding degenerate stroke: {}", err);
            None
        }
    }
}
