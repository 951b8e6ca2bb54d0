//! Pointer events and CSS-to-canvas coordinate mapping.

use crate::scene::CanvasSize;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A pointer event as delivered by the host element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Client (viewport) coordinates of the pointer.
    pub client: Point,
    /// Bounding rect of the canvas element in CSS pixels.
    pub target: Rect,
}

impl PointerEvent {
    pub fn new(client: Point, target: Rect) -> Self {
        Self { client, target }
    }

    /// An event on an element drawn at 1:1 scale at the origin, so client
    /// coordinates are canvas coordinates.
    pub fn at(point: Point, canvas_size: CanvasSize) -> Self {
        Self::new(
            point,
            Rect::new(
                0.0,
                0.0,
                f64::from(canvas_size.width),
                f64::from(canvas_size.height),
            ),
        )
    }

    /// Map the client position into canvas pixel space.
    ///
    /// The element may be displayed at a different size than its backing
    /// store, so each axis is scaled independently. A zero-sized element
    /// maps with scale 1.
    pub fn to_canvas_point(&self, canvas_size: CanvasSize) -> Point {
        let scale = |canvas: u32, css: f64| {
            if css > 0.0 { f64::from(canvas) / css } else { 1.0 }
        };
        let scale_x = scale(canvas_size.width, self.target.width());
        let scale_y = scale(canvas_size.height, self.target.height());
        Point::new(
            (self.client.x - self.target.x0) * scale_x,
            (self.client.y - self.target.y0) * scale_y,
        )
    }
}
