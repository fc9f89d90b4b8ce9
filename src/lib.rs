//! # SheetSketch
//!
//! Freehand sheet-metal profile sketching:
//! - Douglas–Peucker simplification of a pointer stroke
//! - 45° direction snapping and collinear merging
//! - Segment bounding and profile normalization
//! - Edge editing with rigid tail translation
//! - Hem and crease decorations, painted-side marking
//!
//! ## Architecture
//!
//! SheetSketch is organized as a workspace with multiple crates:
//!
//! 1. **sheetsketch-core** - Points, angle helpers, units and errors
//! 2. **sheetsketch-designer** - Straightening pipeline, editor, session, drawing artifact
//! 3. **sheetsketch-settings** - Configuration files and persistence
//! 4. **sheetsketch** - Command-line front end that integrates all crates

pub use sheetsketch_designer as designer;
pub use sheetsketch_settings as settings;

pub use sheetsketch_core::{format_length_mm, parse_number, Error, Point, Result, Scale};

pub use sheetsketch_designer::{
    straighten, BlankSize, Decoration, DecorationKind, Drawing, EndPosition, FoldSize,
    MaterialCalculation, PaintMarking, PaintSide, PipelineConfig, Polyline, PointerRelease,
    SessionConfig, SketchSession,
};

pub use sheetsketch_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays free for drawing JSON
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
