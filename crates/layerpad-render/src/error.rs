//! Render and export errors.

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to allocate export surface: {0}")]
    Surface(#[from] RendererError),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
