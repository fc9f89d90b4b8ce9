//! Raw stroke capture.

use sheetsketch_core::{distance, Point};

/// Minimum pointer movement, in pixels, before a new sample is recorded.
pub const DEFAULT_COALESCE_PX: f64 = 3.0;

/// Collects pointer samples for one drag gesture.
///
/// Moves shorter than the coalescing threshold are dropped, which bounds the
/// growth of the buffer on high-rate pointer devices.
#[derive(Debug, Clone)]
pub struct StrokeBuffer {
    points: Vec<Point>,
    min_move_px: f64,
    active: bool,
}

impl StrokeBuffer {
    pub fn new(min_move_px: f64) -> Self {
        Self {
            points: Vec::new(),
            min_move_px,
            active: false,
        }
    }

    /// Starts a new gesture at `p`, discarding any previous samples.
    pub fn begin(&mut self, p: Point) {
        self.points.clear();
        self.points.push(p);
        self.active = true;
    }

    /// Records `p` if it moved far enough from the last sample.
    ///
    /// Returns whether the sample was kept.
    pub fn extend(&mut self, p: Point) -> bool {
        if !self.active || !p.is_finite() {
            return false;
        }
        match self.points.last() {
            Some(last) if distance(*last, p) < self.min_move_px => false,
            _ => {
                self.points.push(p);
                true
            }
        }
    }

    /// Ends the gesture and hands over the samples.
    pub fn finish(&mut self) -> Vec<Point> {
        self.active = false;
        std::mem::take(&mut self.points)
    }

    /// Drops the gesture without producing anything.
    pub fn cancel(&mut self) {
        self.active = false;
        self.points.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for StrokeBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_COALESCE_PX)
    }
}
