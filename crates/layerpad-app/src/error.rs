//! Application errors.

use layerpad_render::{ExportError, RendererError};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Renderer error: {0}")]
    Render(#[from] RendererError),
    #[error("Invalid data URL: {0}")]
    DataUrl(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
