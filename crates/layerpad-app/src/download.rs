//! Writing exports to disk.

use crate::error::{AppError, AppResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use layerpad_render::export::PNG_DATA_URL_PREFIX;
use std::path::{Path, PathBuf};

/// Write an SVG document as `{basename}.svg` in `dir`.
pub fn save_svg(dir: &Path, basename: &str, svg: &str) -> AppResult<PathBuf> {
    let path = dir.join(format!("{basename}.svg"));
    std::fs::write(&path, svg)?;
    log::info!("Exported SVG to: {}", path.display());
    Ok(path)
}

/// Decode a PNG data URL and write it as `{basename}.png` in `dir`.
pub fn save_png(dir: &Path, basename: &str, data_url: &str) -> AppResult<PathBuf> {
    let png_data = decode_png_data_url(data_url)?;
    let path = dir.join(format!("{basename}.png"));
    std::fs::write(&path, png_data)?;
    log::info!("Exported PNG to: {}", path.display());
    Ok(path)
}

fn decode_png_data_url(data_url: &str) -> AppResult<Vec<u8>> {
    let encoded = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or_else(|| AppError::DataUrl("expected a base64 PNG data URL".to_string()))?;
    STANDARD
        .decode(encoded)
        .map_err(|e| AppError::DataUrl(e.to_string()))
}
