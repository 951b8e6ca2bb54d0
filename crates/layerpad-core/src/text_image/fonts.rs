//! Registry of web fonts by family name.

use super::{TextImageError, sanitize_font_url};
use std::collections::HashMap;

/// Maps a font family to the URL it was loaded from.
///
/// Owned by whoever renders text; there is no process-wide instance.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: HashMap<String, String>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `family` under a validated URL and return the stored URL.
    ///
    /// An already registered family keeps its first URL.
    pub fn register(&mut self, family: &str, url: &str) -> Result<String, TextImageError> {
        if let Some(existing) = self.fonts.get(family) {
            return Ok(existing.clone());
        }
        let url = sanitize_font_url(url)?;
        log::debug!("Registered font {family} from {url}");
        self.fonts.insert(family.to_string(), url.clone());
        Ok(url)
    }

    pub fn get(&self, family: &str) -> Option<&str> {
        self.fonts.get(family).map(String::as_str)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    pub fn remove(&mut self, family: &str) -> Option<String> {
        self.fonts.remove(family)
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
