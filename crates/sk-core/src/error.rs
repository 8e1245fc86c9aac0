//! Failure taxonomy for surface operations.
//!
//! None of these are fatal. The drawing engine and history log them and
//! carry on, so the canvas stays interactive after any single failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No rendering context could be obtained for the surface.
    #[error("rendering context unavailable")]
    Unavailable,
    /// Reading the pixel buffer failed (zero-area or unreadable surface).
    #[error("cannot capture surface: {0}")]
    Capture(String),
    /// Writing a snapshot back failed.
    #[error("cannot restore snapshot: {0}")]
    Restore(String),
    /// A surface could not be allocated with the requested size.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, SurfaceError>;
