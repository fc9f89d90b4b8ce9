//! Error handling for SheetSketch
//!
//! Most user input is coerced rather than rejected, so errors are reserved
//! for requests that cannot be applied at all:
//! - Geometry errors (malformed polylines, typically from re-loaded artifacts)
//! - Drawing errors (edit requests that do not match the current drawing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when a point sequence cannot form a valid polyline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer points than a polyline needs
    #[error("Polyline needs at least {required} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },

    /// Two consecutive points coincide
    #[error("Edge {index} has zero length")]
    DegenerateEdge {
        /// Index of the zero-length edge.
        index: usize,
    },
}

/// Drawing error type
///
/// Raised by edit operations on a committed drawing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawingError {
    /// Edge index does not exist
    #[error("Edge {index} out of range (drawing has {edge_count} edges)")]
    EdgeOutOfRange {
        /// The requested edge index.
        index: usize,
        /// Number of edges in the drawing.
        edge_count: usize,
    },

    /// Vertex index does not exist
    #[error("Vertex {index} out of range (drawing has {vertex_count} vertices)")]
    VertexOutOfRange {
        /// The requested vertex index.
        index: usize,
        /// Number of vertices in the drawing.
        vertex_count: usize,
    },

    /// Too many decorations on one endpoint
    #[error("The {position} endpoint already carries {limit} decorations")]
    DecorationLimit {
        /// Endpoint name.
        position: String,
        /// Maximum number of decorations per endpoint.
        limit: usize,
    },

    /// Decoration index does not exist
    #[error("Decoration {index} out of range")]
    DecorationOutOfRange {
        /// The requested decoration index.
        index: usize,
    },

    /// Decoration size other than 5 or 10 mm
    #[error("Unsupported decoration size: {size_mm} mm")]
    InvalidSize {
        /// The rejected size in millimetres.
        size_mm: u32,
    },

    /// Paint marking is locked
    #[error("Paint marking is locked; unlock it before changing side or colour")]
    PaintLocked,

    /// Painted side has not been aimed yet
    #[error("No painted side chosen; aim the paint arrow before locking")]
    NoPaintSide,

    /// No committed drawing to operate on
    #[error("No committed drawing")]
    NoDrawing,

    /// The request needs a selected edge
    #[error("No edge selected")]
    NoSelection,

    /// A part does not fit the stock blank
    #[error("Part length {part_mm} mm does not fit a {blank_mm} mm blank")]
    DoesNotFitBlank {
        /// Developed length of the part.
        part_mm: i64,
        /// Length of the blank.
        blank_mm: u32,
    },
}

/// Main error type for SheetSketch
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Drawing error
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a drawing error
    pub fn is_drawing_error(&self) -> bool {
        matches!(self, Error::Drawing(_))
    }

    /// Check if this error came from a locked paint marking
    pub fn is_paint_locked(&self) -> bool {
        matches!(self, Error::Drawing(DrawingError::PaintLocked))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
