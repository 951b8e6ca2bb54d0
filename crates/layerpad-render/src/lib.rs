//! Layerpad Render Library
//!
//! Paints a Layerpad scene onto a drawing surface and exports it as SVG or PNG.
//! The default surface rasterizes on the CPU with tiny-skia; the
//! `vello-renderer` feature adds a surface that records a Vello scene.

mod engine;
mod error;
pub mod export;
mod painter;
mod pixmap;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use engine::RenderEngine;
pub use error::{ExportError, RenderResult, RendererError};
pub use export::{DEFAULT_BACKGROUND, export_png, export_png_bytes, export_svg};
pub use painter::{
    Painter, Surface, fill_color, paint_selection, paint_shape, paint_shapes, parse_css_color,
    selection_color, selection_outline,
};
pub use pixmap::PixmapSurface;

#[cfg(feature = "vello-renderer")]
pub use vello_impl::SceneSurface;
