//! PNG export through the same paint routines as the live renderer.

use crate::error::ExportError;
use crate::painter::{Painter, Surface, fill_color, paint_shapes};
use crate::pixmap::PixmapSurface;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use layerpad_core::layers::Layer;
use layerpad_core::scene::CanvasSize;
use layerpad_core::shapes::Shape;

/// Background used when the caller does not pick one.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Prefix of the data URL returned by [`export_png`].
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode straight-alpha RGBA pixel data to PNG bytes.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| ExportError::Encode(format!("failed to write PNG header: {e}")))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| ExportError::Encode(format!("failed to write PNG data: {e}")))?;
    }
    Ok(png_data)
}

/// Rasterize the scene onto `background` and return PNG bytes.
pub fn export_png_bytes(
    shapes: &[Shape],
    layers: &[Layer],
    canvas_size: CanvasSize,
    background: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut surface = PixmapSurface::acquire(canvas_size)?;
    surface.clear(fill_color(background));
    paint_shapes(&mut surface, shapes, layers);

    let png_data = encode_png(&surface.to_rgba8(), canvas_size.width, canvas_size.height)?;
    log::debug!("Exported {} shapes to {} PNG bytes", shapes.len(), png_data.len());
    Ok(png_data)
}

/// Rasterize the scene and return it as a `data:image/png;base64,` URL.
pub fn export_png(
    shapes: &[Shape],
    layers: &[Layer],
    canvas_size: CanvasSize,
    background: &str,
) -> Result<String, ExportError> {
    let png_data = export_png_bytes(shapes, layers, canvas_size, background)?;
    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png_data)))
}
