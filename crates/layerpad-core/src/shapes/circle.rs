//! Circle shape.

use super::{ShapeId, ShapeKind, ShapePatch, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle positioned by the top-left corner of its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box (not the center).
    pub position: Point,
    /// Radius.
    pub radius: f64,
    /// CSS fill color.
    pub fill_color: String,
}

impl Circle {
    /// Create a new circle.
    pub fn new(
        id: impl Into<ShapeId>,
        position: Point,
        radius: f64,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            radius,
            fill_color: fill_color.into(),
        }
    }

    /// Center derived from the top-left corner.
    pub fn center(&self) -> Point {
        Point::new(self.position.x + self.radius, self.position.y + self.radius)
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center(), self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn position(&self) -> Point {
        self.position
    }

    fn fill_color(&self) -> &str {
        &self.fill_color
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.radius * 2.0,
            self.position.y + self.radius * 2.0,
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        point.distance(self.center()) <= self.radius
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        patch.apply_common(&mut self.position, &mut self.fill_color);
        if let Some(radius) = patch.radius {
            self.radius = radius;
        }
    }
}
