//! Vello-based surface: records paint calls into a `vello::Scene` for GPU
//! presentation by the host.

use crate::error::{RenderResult, RendererError};
use crate::painter::{Painter, Surface};
use kurbo::{Affine, BezPath, Rect, Stroke};
use layerpad_core::scene::CanvasSize;
use peniko::{Color, Fill};
use vello::Scene;

/// Surface that encodes draw commands instead of pixels.
pub struct SceneSurface {
    /// The Vello scene being built.
    scene: Scene,
    size: CanvasSize,
}

impl SceneSurface {
    /// The encoded scene, ready for `vello::Renderer::render_to_texture`.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take the scene, leaving an empty one in its place.
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Surface for SceneSurface {
    fn acquire(size: CanvasSize) -> RenderResult<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(RendererError::Surface(format!(
                "invalid scene size {}x{}",
                size.width, size.height
            )));
        }
        Ok(Self {
            scene: Scene::new(),
            size,
        })
    }

    fn size(&self) -> CanvasSize {
        self.size
    }
}

impl Painter for SceneSurface {
    fn clear(&mut self, color: Color) {
        self.scene.reset();
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.size.width),
            f64::from(self.size.height),
        );
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color, None, &bounds);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) {
        self.scene
            .stroke(stroke, Affine::IDENTITY, color, None, path);
    }
}
