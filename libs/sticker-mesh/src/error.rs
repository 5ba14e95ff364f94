//! # Mesh Errors
//!
//! Error types for sticker mesh generation.
//!
//! ## Error Policy
//!
//! - Invalid input fails fast, before any geometry is built
//! - A silhouette with nothing to extrude is not an error
//! - No partial mesh is ever returned alongside an error

use thiserror::Error;

/// Errors that can occur during sticker mesh generation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// The image has zero width or zero height.
    #[error("Image has zero area: {width}x{height}")]
    EmptyImage { width: usize, height: usize },

    /// The pixel buffer does not hold `width * height` RGBA pixels.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// One of the image dimensions exceeds the configured limit.
    #[error("Image too large: {width}x{height} (max side: {max})")]
    ImageTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    /// Thickness must be positive and finite.
    #[error("Invalid thickness: {0} (must be positive)")]
    InvalidThickness(f64),

    /// Size must be positive and finite.
    #[error("Invalid size: {0} (must be positive)")]
    InvalidSize(f64),

    /// Alpha threshold outside `[0, 255]`.
    #[error("Invalid alpha threshold: {0}")]
    InvalidThreshold(String),

    /// Unrecognized boundary strategy name.
    #[error("Unknown boundary strategy: {0} (expected \"grid\" or \"contour\")")]
    UnknownStrategy(String),

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl MeshError {
    /// Creates an invalid threshold error.
    pub fn invalid_threshold(value: impl ToString) -> Self {
        Self::InvalidThreshold(value.to_string())
    }

    /// Creates an unknown strategy error.
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy(name.into())
    }
}

/// Result type alias for mesh generation.
pub type MeshResult<T> = Result<T, MeshError>;
