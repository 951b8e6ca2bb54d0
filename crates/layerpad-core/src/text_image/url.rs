//! Font URL validation.

use super::TextImageError;
use url::Url;

/// Schemes rejected before parsing, compared case-insensitively.
const DANGEROUS_SCHEMES: [&str; 4] = ["javascript:", "data:", "vbscript:", "file:"];

/// Check if `url` parses as an absolute http or https URL.
pub fn is_valid_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return false;
    }
    Url::parse(trimmed).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Trim and validate a font URL, returning the trimmed form.
pub fn sanitize_font_url(url: &str) -> Result<String, TextImageError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(TextImageError::invalid_url("URL cannot be empty"));
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(scheme) = DANGEROUS_SCHEMES.iter().find(|s| lower.starts_with(**s)) {
        return Err(TextImageError::invalid_url(format!(
            "Dangerous protocol detected: {scheme}"
        )));
    }

    if !is_valid_url(trimmed) {
        return Err(TextImageError::invalid_url(
            "Invalid URL format. Only HTTP and HTTPS URLs are allowed.",
        ));
    }

    Ok(trimmed.to_string())
}
