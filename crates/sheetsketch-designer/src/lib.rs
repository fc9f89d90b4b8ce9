//! # SheetSketch Designer
//!
//! Turns a freehand stroke into a clean sheet-metal profile and lets the user
//! annotate it for fabrication.
//!
//! ## Core Components
//!
//! ### Straightening
//! - **Stroke buffer**: coalesced pointer samples for one gesture
//! - **Simplify**: Douglas–Peucker reduction
//! - **Snap**: 45° direction grid
//! - **Merge**: removal of near-straight joints
//! - **Bound**: shortest-edge removal down to a maximum edge count
//! - **Normalize**: leveling and length equalization heuristics
//!
//! ### Editing
//! - **Edge editor**: length/angle edits that translate the tail rigidly
//! - **Decorations**: hems and creases on either endpoint
//! - **Paint**: painted side, colour catalogue and badge placement
//!
//! ### Output
//! - **Drawing**: the JSON artifact handed to order/export collaborators
//! - **Material**: blank count and waste estimate
//! - **Render**: lyon paths for the profile and its decorations
//!
//! ## Architecture
//!
//! ```text
//! SketchSession
//!   ├── StrokeBuffer (active gesture)
//!   ├── pipeline: simplify -> snap -> merge -> bound -> normalize
//!   ├── Polyline (committed geometry)
//!   │     ├── edge_edit
//!   │     └── decorations (derived outlines)
//!   ├── PaintMarking
//!   └── DrawingListener hooks
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sheetsketch_designer::{SketchSession, Point};
//!
//! let mut session = SketchSession::default();
//! session.pointer_down(Point::new(0.0, 0.0));
//! session.pointer_move(Point::new(100.0, 2.0));
//! session.pointer_up();
//!
//! let drawing = session.to_drawing()?;
//! ```

pub mod bound;
pub mod decoration;
pub mod drawing;
pub mod edge_edit;
pub mod listener;
pub mod material;
pub mod merge;
pub mod normalize;
pub mod paint;
pub mod pipeline;
pub mod polyline;
pub mod render;
pub mod session;
pub mod simplify;
pub mod snap;
pub mod stroke;

pub use sheetsketch_core::{Error, Point, Result, Scale};

pub use bound::{bound_segments, shortest_edge, BoundOutcome, DEFAULT_MAX_SEGMENTS};
pub use decoration::{
    decoration_outline, Decoration, DecorationKind, DecorationPreset, DecorationSet, EndPosition,
    FoldSize, DECORATION_PRESETS, MAX_DECORATIONS_PER_END,
};
pub use drawing::Drawing;
pub use edge_edit::{edit_edge, rebuild_tail_from, EdgeDraft, EdgeEditRequest};
pub use listener::{DrawingListener, DrawingListenerHandle};
pub use material::{BlankSize, MaterialCalculation, BLANK_PRESETS};
pub use merge::{merge_collinear, DEFAULT_MERGE_TOLERANCE_DEG, EDIT_MERGE_TOLERANCE_DEG};
pub use normalize::{normalize_profile, NormalizePolicy, MAX_NORMALIZE_ROUNDS};
pub use paint::{
    badge_placement, lookup_color, side_from_angle, side_from_arrow, BadgePlacement,
    PaintMarking, PaintSide,
};
pub use pipeline::{run_stages, straighten, PipelineConfig, PipelineTrace};
pub use polyline::{Bounds, Edge, Polyline};
pub use render::{decoration_path, path_bounds, polyline_path};
pub use session::{PointerRelease, SessionConfig, SketchSession};
pub use simplify::{douglas_peucker, DEFAULT_TOLERANCE_PX};
pub use snap::snap_polyline;
pub use stroke::{StrokeBuffer, DEFAULT_COALESCE_PX};
