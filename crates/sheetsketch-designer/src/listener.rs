//! Drawing listener interface
//!
//! Defines the listener trait for sketch session events

use crate::paint::PaintMarking;
use crate::polyline::Polyline;

/// Handle for a registered drawing listener.
///
/// Returned by `SketchSession::add_listener` and used to remove the
/// listener again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawingListenerHandle(pub String);

/// Listener trait for sketch session events
///
/// Implement this trait to be told when the committed drawing changes.
/// All hooks run synchronously on the handler that caused the change.
pub trait DrawingListener: Send + Sync {
    /// Called when a pointer release commits a new polyline
    fn on_stroke_committed(&self, _polyline: &Polyline) {}

    /// Called after an edge edit, vertex drag or reload
    fn on_geometry_changed(&self, _polyline: &Polyline) {}

    /// Called when the paint side, colour or lock changes
    fn on_paint_changed(&self, _paint: &PaintMarking) {}

    /// Called when the session is cleared for a new sketch
    fn on_reset(&self) {}
}
