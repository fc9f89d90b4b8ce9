//! # SheetSketch Core
//!
//! Core types and utilities for SheetSketch.
//! Provides the geometry primitives every pipeline stage builds on,
//! the pixel/millimetre scale, and the shared error types.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{DrawingError, Error, GeometryError, Result};

pub use geometry::{
    angle_between, angular_difference, classify_angle, distance, normalize_degrees,
    perpendicular_distance, point_from_polar, snap_angle, EdgeClass, Point, COINCIDENT_EPSILON,
    DEFAULT_SNAP_STEP,
};

pub use units::{
    format_length_mm, parse_number, Scale, DEFAULT_MM_PER_PX, MAX_MM_PER_PX, MIN_MM_PER_PX,
};
