//! Render a block of text into a standalone SVG image.
//!
//! Text is measured with a fixed per-character estimate rather than real font
//! metrics, so the output size is deterministic across platforms.

mod fonts;
mod url;

pub use fonts::FontRegistry;
pub use url::{is_valid_url, sanitize_font_url};

use crate::markup::{escape_xml, format_number};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default line height multiplier.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Default padding around the text, in pixels.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Estimated advance of one character as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Category of a text-image failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidUrl,
    FontLoadFailed,
    FontLoadTimeout,
    InvalidText,
    RenderError,
    Unknown,
}

/// Error returned by text-image operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct TextImageError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TextImageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUrl, message)
    }

    pub fn invalid_text(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidText, message)
    }
}

/// Input to [`render_text_to_svg`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextImageOptions {
    /// Text to render; `\n` starts a new line when `max_width` is unset.
    pub text: String,
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    pub text_color: String,
    /// CSS background; empty or `transparent` omits the background rect.
    pub background_color: String,
    pub line_height: f64,
    pub padding: f64,
    /// Wrap on whitespace so no line exceeds this width.
    pub max_width: Option<f64>,
}

impl Default for TextImageOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: "sans-serif".to_string(),
            font_size: 48.0,
            text_color: "#000000".to_string(),
            background_color: "transparent".to_string(),
            line_height: DEFAULT_LINE_HEIGHT,
            padding: DEFAULT_PADDING,
            max_width: None,
        }
    }
}

/// Output of [`render_text_to_svg`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextImageRender {
    pub svg: String,
    /// `data:image/svg+xml,` URL of `svg`.
    pub data_url: String,
    pub width: f64,
    pub height: f64,
}

/// Measured text block.
#[derive(Debug, Clone, PartialEq)]
struct Measurement {
    lines: Vec<String>,
    width: f64,
    height: f64,
}

fn estimate_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * CHAR_WIDTH_RATIO
}

fn measure(options: &TextImageOptions) -> Measurement {
    let font_size = options.font_size;
    let mut lines = Vec::new();
    let mut width: f64 = 0.0;

    match options.max_width {
        Some(max_width) => {
            let mut current = String::new();
            for word in options.text.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{current} {word}")
                };
                if estimate_width(&candidate, font_size) > max_width && !current.is_empty() {
                    width = width.max(estimate_width(&current, font_size).min(max_width));
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                } else {
                    current = candidate;
                }
            }
            if !current.is_empty() {
                width = width.max(estimate_width(&current, font_size).min(max_width));
                lines.push(current);
            }
        }
        None => {
            for line in options.text.split('\n') {
                width = width.max(estimate_width(line, font_size));
                lines.push(line.to_string());
            }
        }
    }

    let height = lines.len() as f64 * font_size * options.line_height;
    Measurement {
        lines,
        width,
        height,
    }
}

/// Lay out `options.text` and emit it as an SVG document.
pub fn render_text_to_svg(options: &TextImageOptions) -> Result<TextImageRender, TextImageError> {
    if options.text.trim().is_empty() {
        return Err(TextImageError::invalid_text("Text cannot be empty"));
    }
    if !options.font_size.is_finite() || options.font_size <= 0.0 {
        return Err(TextImageError::new(
            ErrorKind::RenderError,
            format!("Invalid font size: {}", options.font_size),
        ));
    }

    let measurement = measure(options);
    let padding = options.padding;
    let font_size = options.font_size;
    let width = measurement.width + padding * 2.0;
    let height = measurement.height + padding * 2.0;

    let mut parts: Vec<String> = vec![
        "<svg".to_string(),
        r#"xmlns="http://www.w3.org/2000/svg""#.to_string(),
        format!(r#"width="{}""#, format_number(width)),
        format!(r#"height="{}""#, format_number(height)),
        ">".to_string(),
    ];

    let background = options.background_color.trim();
    if !background.is_empty() && background != "transparent" {
        parts.push(format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(background)
        ));
    }

    parts.push("<text".to_string());
    parts.push(format!(r#"x="{}""#, format_number(padding)));
    parts.push(format!(r#"y="{}""#, format_number(padding + font_size)));
    parts.push(format!(r#"font-family="{}""#, escape_xml(&options.font_family)));
    parts.push(format!(r#"font-size="{}""#, format_number(font_size)));
    parts.push(format!(r#"fill="{}""#, escape_xml(&options.text_color)));
    parts.push(r#"dominant-baseline="hanging""#.to_string());

    match measurement.lines.as_slice() {
        [single] => parts.push(format!(">{}</text>", escape_xml(single))),
        lines => {
            parts.push(">".to_string());
            for (index, line) in lines.iter().enumerate() {
                let y = padding + font_size + index as f64 * font_size * options.line_height;
                parts.push(format!(
                    r#"<tspan x="{}" y="{}">{}</tspan>"#,
                    format_number(padding),
                    format_number(y),
                    escape_xml(line)
                ));
            }
            parts.push("</text>".to_string());
        }
    }
    parts.push("</svg>".to_string());

    let svg = parts.join("\n");
    let data_url = svg_to_data_url(&svg);
    Ok(TextImageRender {
        svg,
        data_url,
        width,
        height,
    })
}

/// Percent-encode `svg` into a `data:image/svg+xml,` URL.
///
/// Leaves the same characters unescaped as `encodeURIComponent`.
pub fn svg_to_data_url(svg: &str) -> String {
    let encoded = urlencoding::encode(svg)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*");
    format!("data:image/svg+xml,{encoded}")
}
