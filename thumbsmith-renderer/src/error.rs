//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The SVG intermediate could not be parsed.
    #[error("SVG parsing failed: {0}")]
    Svg(String),

    /// Resource loading failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Rasterization onto the pixmap failed.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Output encoding failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}
