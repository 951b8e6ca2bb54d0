//! Scene exporters.

mod png;
mod svg;

pub use png::{DEFAULT_BACKGROUND, PNG_DATA_URL_PREFIX, encode_png, export_png, export_png_bytes};
pub use svg::{export_svg, shape_to_svg};
