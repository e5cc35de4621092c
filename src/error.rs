//! Error types.
//!
//! Degenerate geometry never produces an error; it degrades to drawing
//! nothing or to a flat color. Errors are reserved for caller-supplied data
//! that violates a precondition.

use thiserror::Error;

/// Errors returned by constructors that take caller-owned buffers or data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel vector length does not match `width * height`
    #[error("pixel count mismatch: expected {expected} for the given dimensions, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    /// Resampling filter name not recognized
    #[error("unknown resampling filter: {0}")]
    UnknownFilter(String),

    /// Font data could not be parsed
    #[error("font error: {0}")]
    Font(String),
}

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;
