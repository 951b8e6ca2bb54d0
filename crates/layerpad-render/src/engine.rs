//! Render engine: owns a surface and repaints it when the scene changes.
//!
//! The engine does not schedule itself. The host calls [`RenderEngine::tick`]
//! once per display refresh (or whenever it likes); a tick only paints if
//! something was set since the last paint.

use crate::error::RenderResult;
use crate::painter::{Surface, paint_selection, paint_shapes};
use layerpad_core::layers::Layer;
use layerpad_core::scene::{CanvasSize, SceneSnapshot};
use layerpad_core::shapes::{Shape, ShapeId};
use peniko::Color;

/// Persistent surface owner with a dirty flag.
pub struct RenderEngine<S: Surface> {
    surface: S,
    shapes: Vec<Shape>,
    layers: Vec<Layer>,
    selected_shape_id: Option<ShapeId>,
    /// Color the surface is cleared to before each frame.
    clear_color: Color,
    /// Set by every setter, cleared by a painted tick.
    dirty: bool,
    destroyed: bool,
    /// Revision of the last snapshot pulled by `observe`.
    observed_revision: Option<u64>,
    frames: u64,
}

impl<S: Surface> RenderEngine<S> {
    /// Acquire a surface of `canvas_size`. The first tick always paints.
    pub fn new(canvas_size: CanvasSize) -> RenderResult<Self> {
        let surface = S::acquire(canvas_size)?;
        log::debug!(
            "Render engine started on a {}x{} surface",
            canvas_size.width,
            canvas_size.height
        );
        Ok(Self {
            surface,
            shapes: Vec::new(),
            layers: Vec::new(),
            selected_shape_id: None,
            clear_color: Color::from_rgba8(0, 0, 0, 0),
            dirty: true,
            destroyed: false,
            observed_revision: None,
            frames: 0,
        })
    }

    /// Clear to `color` instead of transparent.
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.surface.size()
    }

    /// Replace the shapes to draw.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        if self.destroyed {
            return;
        }
        self.shapes = shapes;
        self.mark_dirty();
    }

    /// Replace the layers that decide paint order.
    pub fn set_layers(&mut self, layers: Vec<Layer>) {
        if self.destroyed {
            return;
        }
        self.layers = layers;
        self.mark_dirty();
    }

    /// Set the shape that gets a selection outline.
    pub fn set_selected_shape_id(&mut self, id: Option<ShapeId>) {
        if self.destroyed {
            return;
        }
        self.selected_shape_id = id;
        self.mark_dirty();
    }

    /// Pull state from a snapshot if its revision is new.
    ///
    /// Returns whether anything was taken.
    pub fn observe(&mut self, snapshot: &SceneSnapshot) -> bool {
        if self.destroyed || self.observed_revision == Some(snapshot.revision) {
            return false;
        }
        self.observed_revision = Some(snapshot.revision);
        self.shapes = snapshot.shapes.clone();
        self.layers = snapshot.layers.clone();
        self.selected_shape_id = snapshot.selected_shape_id.clone();
        self.mark_dirty();
        true
    }

    /// Force a repaint on the next tick.
    pub fn mark_dirty(&mut self) {
        if !self.destroyed {
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Paint a frame if dirty. Returns whether a frame was painted.
    pub fn tick(&mut self) -> bool {
        if self.destroyed || !self.dirty {
            return false;
        }

        self.surface.clear(self.clear_color);
        paint_shapes(&mut self.surface, &self.shapes, &self.layers);

        if let Some(selected) = self
            .selected_shape_id
            .as_deref()
            .and_then(|id| self.shapes.iter().find(|s| s.id() == id))
        {
            paint_selection(&mut self.surface, selected);
        }

        self.dirty = false;
        self.frames += 1;
        log::trace!("Painted frame {} ({} shapes)", self.frames, self.shapes.len());
        true
    }

    /// Stop painting for good.
    pub fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.dirty = false;
            log::debug!("Render engine destroyed after {} frames", self.frames);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
