//! Application configuration.

use crate::error::{AppError, AppResult};
use layerpad_core::scene::CanvasSize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration, loaded from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// CSS color behind exported PNGs.
    pub background_color: String,
    /// File name (without extension) for exports.
    pub basename: String,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
    pub export_svg: bool,
    pub export_png: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1920,
            canvas_height: 1080,
            background_color: "#ffffff".to_string(),
            basename: "canvas".to_string(),
            output_dir: PathBuf::from("."),
            export_svg: true,
            export_png: true,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    fn validate(&self) -> AppResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(AppError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.basename.trim().is_empty() {
            return Err(AppError::InvalidConfig("basename cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.canvas_size(), CanvasSize::new(1920, 1080));
        assert_eq!(config.basename, "canvas");
        assert!(config.export_svg && config.export_png);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AppConfig::from_json(r#"{"canvas_width": 800, "basename": "poster"}"#).unwrap();
        assert_eq!(config.canvas_size(), CanvasSize::new(800, 1080));
        assert_eq!(config.basename, "poster");
        assert_eq!(config.background_color, "#ffffff");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(AppConfig::from_json("{"), Err(AppError::Config(_))));
        assert!(matches!(
            AppConfig::from_json(r#"{"canvas_height": 0}"#),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layerpad.json");
        std::fs::write(&path, r#"{"export_png": false}"#).unwrap();

        let config = AppConfig::load_or_default(Some(&path)).unwrap();
        assert!(!config.export_png);
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
        assert!(matches!(
            AppConfig::load(&dir.path().join("missing.json")),
            Err(AppError::Io(_))
        ));
    }
}
