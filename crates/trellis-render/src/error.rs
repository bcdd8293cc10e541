//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur when building geometry or measuring text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Invalid dimensions (negative width or height).
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// A rectangle with zero area where an area is required.
    #[error("rectangle has zero area: {width}x{height}")]
    EmptyRect { width: i32, height: i32 },

    /// A character size of zero was requested.
    #[error("character size must be positive")]
    ZeroCharacterSize,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
