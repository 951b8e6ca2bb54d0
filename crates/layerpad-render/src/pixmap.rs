//! CPU surface backed by a tiny-skia pixmap.

use crate::error::{RenderResult, RendererError};
use crate::painter::{Painter, Surface};
use kurbo::{BezPath, PathEl, Stroke};
use layerpad_core::scene::CanvasSize;
use peniko::Color;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, StrokeDash, Transform};

/// Offscreen RGBA surface.
pub struct PixmapSurface {
    pixmap: Pixmap,
    size: CanvasSize,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface").field("size", &self.size).finish()
    }
}

impl PixmapSurface {
    /// Straight-alpha RGBA bytes, row-major, 4 bytes per pixel.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Straight-alpha color of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // tiny-skia only checks the flat index, so x past the row end would wrap.
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixmap.pixel(x, y).map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }
}

impl Surface for PixmapSurface {
    fn acquire(size: CanvasSize) -> RenderResult<Self> {
        let pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| {
            RendererError::Surface(format!(
                "cannot allocate a {}x{} pixmap",
                size.width, size.height
            ))
        })?;
        Ok(Self { pixmap, size })
    }

    fn size(&self) -> CanvasSize {
        self.size
    }
}

impl Painter for PixmapSurface {
    fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a));
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let dash = if stroke.dash_pattern.is_empty() {
            None
        } else {
            StrokeDash::new(
                stroke.dash_pattern.iter().map(|d| *d as f32).collect(),
                stroke.dash_offset as f32,
            )
        };
        let skia_stroke = tiny_skia::Stroke {
            width: stroke.width as f32,
            dash,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid_paint(color),
            &skia_stroke,
            Transform::identity(),
            None,
        );
    }
}

fn solid_paint(color: Color) -> Paint<'static> {
    let rgba = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path. Empty or degenerate paths yield `None`.
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => {
                builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32);
            }
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
