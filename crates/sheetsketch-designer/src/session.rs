//! Sketch session: the state behind one drawing surface.
//!
//! A session owns the stroke buffer, the committed polyline and its
//! annotations. Input handlers mutate it synchronously; invalid requests are
//! logged and leave the state as it was.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sheetsketch_core::{DrawingError, Point, Scale, DEFAULT_MM_PER_PX};

use crate::decoration::{decoration_outline, Decoration, DecorationSet, EndPosition};
use crate::drawing::{coerce_quantity, Drawing};
use crate::edge_edit::{edit_edge, EdgeDraft, EdgeEditRequest};
use crate::listener::{DrawingListener, DrawingListenerHandle};
use crate::material::{BlankSize, MaterialCalculation};
use crate::merge::EDIT_MERGE_TOLERANCE_DEG;
use crate::paint::{
    badge_placement, BadgePlacement, PaintMarking, PaintSide, DEFAULT_PAINT_COLOR,
    DEFAULT_PAINT_LABEL,
};
use crate::pipeline::{straighten, PipelineConfig};
use crate::polyline::Polyline;
use crate::stroke::{StrokeBuffer, DEFAULT_COALESCE_PX};

/// Settings a session starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub pipeline: PipelineConfig,
    pub mm_per_px: f64,
    pub coalesce_px: f64,
    pub edit_merge_tolerance_deg: f64,
    pub angle_edit_enabled: bool,
    pub default_quantity: u32,
    pub default_paint_color: String,
    pub default_paint_label: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            mm_per_px: DEFAULT_MM_PER_PX,
            coalesce_px: DEFAULT_COALESCE_PX,
            edit_merge_tolerance_deg: EDIT_MERGE_TOLERANCE_DEG,
            angle_edit_enabled: false,
            default_quantity: 1,
            default_paint_color: DEFAULT_PAINT_COLOR.to_string(),
            default_paint_label: DEFAULT_PAINT_LABEL.to_string(),
        }
    }
}

/// What a pointer release did.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerRelease {
    /// No gesture was in progress, or it was ignored.
    Nothing,
    /// The stroke was too short or collapsed and was dropped.
    Discarded,
    /// A new polyline was committed.
    Committed {
        edge_count: usize,
        total_length_mm: i64,
    },
    /// The paint arrow picked a side.
    PaintAimed(PaintSide),
}

enum Gesture {
    Idle,
    Stroke,
    Arrow { start: Point, end: Point },
}

pub struct SketchSession {
    config: SessionConfig,
    scale: Scale,
    stroke: StrokeBuffer,
    gesture: Gesture,
    polyline: Option<Polyline>,
    decorations: DecorationSet,
    paint: PaintMarking,
    paint_mode: bool,
    angle_edit_enabled: bool,
    selected_edge: Option<usize>,
    quantity: u32,
    notes: Option<String>,
    listeners: Vec<(DrawingListenerHandle, Box<dyn DrawingListener>)>,
}

impl SketchSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            scale: Scale::new(config.mm_per_px),
            stroke: StrokeBuffer::new(config.coalesce_px),
            gesture: Gesture::Idle,
            polyline: None,
            decorations: DecorationSet::new(),
            paint: Self::fresh_paint(&config),
            paint_mode: false,
            angle_edit_enabled: config.angle_edit_enabled,
            selected_edge: None,
            quantity: config.default_quantity.max(1),
            notes: None,
            listeners: Vec::new(),
            config,
        }
    }

    fn fresh_paint(config: &SessionConfig) -> PaintMarking {
        PaintMarking::with_defaults(&config.default_paint_color, &config.default_paint_label)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Updates the millimetres-per-pixel ratio; returns the clamped value.
    pub fn set_scale(&mut self, mm_per_px: f64) -> f64 {
        self.scale.set(mm_per_px)
    }

    pub fn polyline(&self) -> Option<&Polyline> {
        self.polyline.as_ref()
    }

    pub fn is_straightened(&self) -> bool {
        self.polyline.is_some()
    }

    pub fn total_length_mm(&self) -> Option<i64> {
        self.polyline.as_ref().map(|p| p.total_length_mm(self.scale))
    }

    /// Samples of the gesture in progress, for live preview.
    pub fn stroke_points(&self) -> &[Point] {
        self.stroke.points()
    }

    // Pointer input

    pub fn pointer_down(&mut self, p: Point) {
        if self.paint_mode {
            self.gesture = Gesture::Arrow { start: p, end: p };
            return;
        }
        if self.polyline.is_some() {
            tracing::debug!("Ignoring stroke start; a drawing is already committed");
            return;
        }
        self.stroke.begin(p);
        self.gesture = Gesture::Stroke;
        self.selected_edge = None;
    }

    pub fn pointer_move(&mut self, p: Point) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Stroke => {
                self.stroke.extend(p);
            }
            Gesture::Arrow { end, .. } => *end = p,
        }
    }

    /// Ends the gesture. This is the only point where a stroke is committed.
    pub fn pointer_up(&mut self) -> PointerRelease {
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => PointerRelease::Nothing,
            Gesture::Arrow { start, end } => self.finish_arrow(start, end),
            Gesture::Stroke => {
                let raw = self.stroke.finish();
                match straighten(&raw, &self.config.pipeline) {
                    Some(polyline) => {
                        let release = PointerRelease::Committed {
                            edge_count: polyline.edge_count(),
                            total_length_mm: polyline.total_length_mm(self.scale),
                        };
                        tracing::info!(
                            "Committed sketch: {} raw points -> {} edges",
                            raw.len(),
                            polyline.edge_count()
                        );
                        for (_, listener) in &self.listeners {
                            listener.on_stroke_committed(&polyline);
                        }
                        self.polyline = Some(polyline);
                        release
                    }
                    None => PointerRelease::Discarded,
                }
            }
        }
    }

    /// Drops the gesture in progress.
    pub fn cancel_gesture(&mut self) {
        self.stroke.cancel();
        self.gesture = Gesture::Idle;
    }

    fn finish_arrow(&mut self, start: Point, end: Point) -> PointerRelease {
        if start.coincides_with(&end) {
            return PointerRelease::Nothing;
        }
        match self.paint.aim(start, end) {
            Ok(side) => {
                self.notify_paint();
                PointerRelease::PaintAimed(side)
            }
            Err(err) => {
                tracing::warn!("Paint arrow ignored: {}", err);
                PointerRelease::Nothing
            }
        }
    }

    // Modes

    pub fn set_paint_mode(&mut self, enabled: bool) {
        if self.paint_mode != enabled {
            self.cancel_gesture();
        }
        self.paint_mode = enabled;
    }

    pub fn is_paint_mode(&self) -> bool {
        self.paint_mode
    }

    pub fn set_angle_edit_enabled(&mut self, enabled: bool) {
        self.angle_edit_enabled = enabled;
    }

    pub fn is_angle_edit_enabled(&self) -> bool {
        self.angle_edit_enabled
    }

    // Edge editing

    fn committed(&self) -> crate::Result<&Polyline> {
        self.polyline.as_ref().ok_or_else(|| DrawingError::NoDrawing.into())
    }

    /// Selects an edge and returns the values to pre-fill the editor with.
    pub fn select_edge(&mut self, index: usize) -> crate::Result<EdgeDraft> {
        let edge = self.committed()?.edge(index)?;
        self.selected_edge = Some(index);
        Ok(EdgeDraft::for_edge(&edge, self.scale))
    }

    pub fn selected_edge(&self) -> Option<usize> {
        self.selected_edge
    }

    pub fn clear_selection(&mut self) {
        self.selected_edge = None;
    }

    /// Applies an edit request to edge `index`.
    pub fn apply_edge_edit(&mut self, index: usize, request: &EdgeEditRequest) -> crate::Result<()> {
        let edited = edit_edge(
            self.committed()?,
            index,
            request,
            self.scale,
            self.config.edit_merge_tolerance_deg,
        )?;
        self.replace_geometry(edited);
        Ok(())
    }

    /// Applies text fields to the selected edge, honouring the angle toggle.
    pub fn edit_selected(&mut self, length_text: &str, angle_text: &str) -> crate::Result<()> {
        let index = self.selected_edge.ok_or(DrawingError::NoSelection)?;
        let request = EdgeEditRequest::parse(length_text, angle_text, self.angle_edit_enabled);
        self.apply_edge_edit(index, &request)
    }

    /// Moves one vertex to `position` as-is, without re-snapping.
    pub fn drag_vertex(&mut self, index: usize, position: Point) -> crate::Result<()> {
        let moved = self.committed()?.with_vertex(index, position)?;
        self.replace_geometry(moved);
        Ok(())
    }

    fn replace_geometry(&mut self, polyline: Polyline) {
        if let Some(i) = self.selected_edge {
            if i >= polyline.edge_count() {
                self.selected_edge = None;
            }
        }
        for (_, listener) in &self.listeners {
            listener.on_geometry_changed(&polyline);
        }
        self.polyline = Some(polyline);
    }

    // Decorations

    pub fn add_decoration(&mut self, decoration: Decoration) -> crate::Result<usize> {
        self.committed()?;
        Ok(self.decorations.add(decoration)?)
    }

    pub fn remove_decoration(&mut self, index: usize) -> crate::Result<Decoration> {
        Ok(self.decorations.remove(index)?)
    }

    pub fn clear_decorations(&mut self, position: EndPosition) -> usize {
        self.decorations.clear_at(position)
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    /// Current outline of every decoration, derived from the live polyline.
    pub fn decoration_outlines(&self) -> Vec<(Decoration, Vec<Point>)> {
        let Some(polyline) = &self.polyline else {
            return Vec::new();
        };
        self.decorations
            .iter()
            .map(|d| (*d, decoration_outline(polyline, d, self.scale)))
            .collect()
    }

    // Paint

    pub fn paint(&self) -> &PaintMarking {
        &self.paint
    }

    pub fn commit_paint(&mut self, color_hex: &str, label: &str) -> crate::Result<()> {
        self.paint.commit(color_hex, label)?;
        self.notify_paint();
        Ok(())
    }

    /// Commits a palette or RAL code; returns whether it was recognised.
    pub fn commit_paint_code(&mut self, code: &str) -> crate::Result<bool> {
        let known = self.paint.commit_code(code)?;
        if known {
            self.notify_paint();
        }
        Ok(known)
    }

    pub fn unlock_paint(&mut self) {
        self.paint.unlock();
        self.notify_paint();
    }

    /// Badge position for the current paint side, if there is one.
    pub fn paint_badge(&self) -> Option<BadgePlacement> {
        let side = self.paint.side?;
        let polyline = self.polyline.as_ref()?;
        Some(badge_placement(&polyline.bounds(), side))
    }

    fn notify_paint(&self) {
        for (_, listener) in &self.listeners {
            listener.on_paint_changed(&self.paint);
        }
    }

    // Order details

    pub fn set_quantity(&mut self, quantity: i64) -> u32 {
        self.quantity = coerce_quantity(quantity);
        self.quantity
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = (!notes.trim().is_empty()).then_some(notes);
    }

    pub fn material_estimate(&self, blank: BlankSize) -> crate::Result<MaterialCalculation> {
        let length = self.committed()?.total_length_mm(self.scale);
        Ok(MaterialCalculation::estimate(blank, length, self.quantity)?)
    }

    // Artifact

    /// Produces the artifact for the committed drawing.
    pub fn to_drawing(&self) -> crate::Result<Drawing> {
        let polyline = self.committed()?;
        let mut drawing = Drawing::new(polyline, self.decorations.clone(), &self.paint, self.scale)
            .with_quantity(self.quantity as i64);
        drawing.notes = self.notes.clone();
        Ok(drawing)
    }

    /// Resumes editing a stored drawing. The polyline is taken as stored.
    pub fn load_drawing(&mut self, drawing: &Drawing) -> crate::Result<()> {
        let polyline = drawing.polyline()?;
        self.cancel_gesture();
        self.decorations = drawing.decorations.clone();
        self.paint = drawing.paint_marking();
        self.quantity = drawing.quantity.max(1);
        self.notes = drawing.notes.clone();
        self.selected_edge = None;
        tracing::info!("Loaded drawing {} ({} edges)", drawing.id, polyline.edge_count());
        self.replace_geometry(polyline);
        Ok(())
    }

    /// Clears everything for a new sketch. Scale and listeners are kept.
    pub fn reset(&mut self) {
        self.cancel_gesture();
        self.polyline = None;
        self.decorations.clear();
        self.paint = Self::fresh_paint(&self.config);
        self.paint_mode = false;
        self.selected_edge = None;
        self.quantity = self.config.default_quantity.max(1);
        self.notes = None;
        for (_, listener) in &self.listeners {
            listener.on_reset();
        }
    }

    // Listeners

    pub fn add_listener(&mut self, listener: Box<dyn DrawingListener>) -> DrawingListenerHandle {
        let handle = DrawingListenerHandle(Uuid::new_v4().to_string());
        self.listeners.push((handle.clone(), listener));
        handle
    }

    pub fn remove_listener(&mut self, handle: &DrawingListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| h != handle);
        before != self.listeners.len()
    }
}

impl Default for SketchSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoration::{DecorationKind, FoldSize};
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn draw(session: &mut SketchSession, pts: &[(f64, f64)]) -> PointerRelease {
        let mut iter = pts.iter();
        if let Some(&(x, y)) = iter.next() {
            session.pointer_down(Point::new(x, y));
        }
        for &(x, y) in iter {
            session.pointer_move(Point::new(x, y));
        }
        session.pointer_up()
    }

    fn l_shape(session: &mut SketchSession) {
        let release = draw(session, &[(0.0, 0.0), (100.0, 0.0), (100.0, 60.0)]);
        assert!(matches!(release, PointerRelease::Committed { edge_count: 2, .. }));
    }

    #[derive(Default)]
    struct Counter {
        commits: AtomicUsize,
        changes: AtomicUsize,
        resets: AtomicUsize,
    }

    struct CountingListener(Arc<Counter>);

    impl DrawingListener for CountingListener {
        fn on_stroke_committed(&self, _polyline: &Polyline) {
            self.0.commits.fetch_add(1, Ordering::SeqCst);
        }

        fn on_geometry_changed(&self, _polyline: &Polyline) {
            self.0.changes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_reset(&self) {
            self.0.resets.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_short_stroke_discarded() {
        let mut session = SketchSession::default();
        assert_eq!(draw(&mut session, &[(5.0, 5.0), (6.0, 6.0)]), PointerRelease::Discarded);
        assert!(!session.is_straightened());
        assert_eq!(session.pointer_up(), PointerRelease::Nothing);
    }

    #[test]
    fn test_second_stroke_ignored_until_reset() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        assert_eq!(draw(&mut session, &[(0.0, 0.0), (50.0, 50.0)]), PointerRelease::Nothing);
        session.reset();
        assert!(!session.is_straightened());
        assert!(matches!(
            draw(&mut session, &[(0.0, 0.0), (80.0, 0.0)]),
            PointerRelease::Committed { edge_count: 1, .. }
        ));
    }

    #[test]
    fn test_select_and_edit() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        let draft = session.select_edge(1).unwrap();
        assert_eq!(draft.length_mm, 30);
        assert_eq!(draft.angle_deg, 90);
        session.edit_selected("40", "").unwrap();
        assert_eq!(session.total_length_mm(), Some(90));
        assert!(session.select_edge(9).is_err());
    }

    #[test]
    fn test_edit_selected_needs_selection() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        let err = session.edit_selected("40", "").unwrap_err();
        assert!(matches!(err, Error::Drawing(DrawingError::NoSelection)));
        assert_eq!(session.total_length_mm(), Some(80));
    }

    #[test]
    fn test_edit_without_drawing() {
        let mut session = SketchSession::default();
        let err = session
            .apply_edge_edit(0, &EdgeEditRequest::length(10.0))
            .unwrap_err();
        assert!(err.is_drawing_error());
        assert!(session.to_drawing().is_err());
    }

    #[test]
    fn test_paint_flow() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        session.set_paint_mode(true);
        assert_eq!(
            draw(&mut session, &[(50.0, 50.0), (50.0, 0.0)]),
            PointerRelease::PaintAimed(PaintSide::Top)
        );
        session.commit_paint_code("RAL9005").unwrap();
        assert!(session.paint().is_locked());
        // locked: a new arrow changes nothing
        assert_eq!(
            draw(&mut session, &[(0.0, 0.0), (50.0, 0.0)]),
            PointerRelease::Nothing
        );
        assert_eq!(session.paint().side, Some(PaintSide::Top));
        assert!(session.commit_paint("#ffffff", "X").unwrap_err().is_paint_locked());

        let badge = session.paint_badge().unwrap();
        assert_eq!(badge.leader_target, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_paint_commit_waits_for_arrow() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        let err = session.commit_paint("#123456", "X").unwrap_err();
        assert!(matches!(err, Error::Drawing(DrawingError::NoPaintSide)));
        assert!(!session.paint().is_locked());
        assert!(session.paint().side.is_none());

        session.set_paint_mode(true);
        draw(&mut session, &[(50.0, 50.0), (50.0, 0.0)]);
        session.commit_paint("#123456", "X").unwrap();
        let json = session.to_drawing().unwrap().to_json().unwrap();

        let mut reopened = SketchSession::default();
        reopened.load_drawing(&Drawing::from_json(&json).unwrap()).unwrap();
        assert!(reopened.paint().is_locked());
        assert_eq!(reopened.paint().side, Some(PaintSide::Top));
        assert_eq!(reopened.paint().color_hex, "#123456");
    }

    #[test]
    fn test_drawing_round_trip() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        session
            .add_decoration(Decoration::new(
                EndPosition::End,
                DecorationKind::Crease,
                FoldSize::Mm5,
            ))
            .unwrap();
        session.set_quantity(-3);
        session.set_notes("two pieces left hand");
        let drawing = session.to_drawing().unwrap();
        assert_eq!(drawing.quantity, 1);
        assert_eq!(drawing.total_length_mm, 80);

        let mut other = SketchSession::default();
        other.load_drawing(&drawing).unwrap();
        assert_eq!(other.polyline().unwrap().points(), drawing.points.as_slice());
        assert_eq!(other.decorations().len(), 1);
        assert_eq!(other.decoration_outlines().len(), 1);
    }

    #[test]
    fn test_listeners() {
        let counter = Arc::new(Counter::default());
        let mut session = SketchSession::default();
        let handle = session.add_listener(Box::new(CountingListener(counter.clone())));
        l_shape(&mut session);
        session.drag_vertex(2, Point::new(100.0, 80.0)).unwrap();
        session.reset();
        assert_eq!(counter.commits.load(Ordering::SeqCst), 1);
        assert_eq!(counter.changes.load(Ordering::SeqCst), 1);
        assert_eq!(counter.resets.load(Ordering::SeqCst), 1);

        assert!(session.remove_listener(&handle));
        assert!(!session.remove_listener(&handle));
    }

    #[test]
    fn test_material_estimate() {
        let mut session = SketchSession::default();
        l_shape(&mut session);
        session.set_quantity(100);
        let calc = session.material_estimate(BlankSize::default()).unwrap();
        assert_eq!(calc.max_pieces_per_blank, 75);
        assert_eq!(calc.blanks_needed, 2);
    }
}
