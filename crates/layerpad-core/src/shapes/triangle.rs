//! Triangle shape.

use super::{ShapeId, ShapeKind, ShapePatch, ShapeTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// An isosceles triangle inscribed in its bounding box: apex at top-center,
/// base along the bottom edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub(crate) id: ShapeId,
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Bounding box width.
    pub width: f64,
    /// Bounding box height.
    pub height: f64,
    /// CSS fill color.
    pub fill_color: String,
}

impl Triangle {
    /// Create a new triangle.
    pub fn new(
        id: impl Into<ShapeId>,
        position: Point,
        width: f64,
        height: f64,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            width,
            height,
            fill_color: fill_color.into(),
        }
    }

    /// The three vertices: apex, bottom-left, bottom-right.
    pub fn vertices(&self) -> [Point; 3] {
        let Point { x, y } = self.position;
        [
            Point::new(x + self.width / 2.0, y),
            Point::new(x, y + self.height),
            Point::new(x + self.width, y + self.height),
        ]
    }
}

impl ShapeTrait for Triangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
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
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        let [p1, p2, p3] = self.vertices();

        // Barycentric coordinates of `point` relative to the three vertices.
        let denominator = (p2.y - p3.y) * (p1.x - p3.x) + (p3.x - p2.x) * (p1.y - p3.y);
        let a = ((p2.y - p3.y) * (point.x - p3.x) + (p3.x - p2.x) * (point.y - p3.y)) / denominator;
        let b = ((p3.y - p1.y) * (point.x - p3.x) + (p1.x - p3.x) * (point.y - p3.y)) / denominator;
        let c = 1.0 - a - b;

        // A degenerate triangle yields NaN here, which compares false.
        a >= 0.0 && b >= 0.0 && c >= 0.0
    }

    fn to_path(&self) -> BezPath {
        let [apex, left, right] = self.vertices();
        let mut path = BezPath::new();
        path.move_to(apex);
        path.line_to(left);
        path.line_to(right);
        path.close_path();
        path
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        patch.apply_common(&mut self.position, &mut self.fill_color);
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
    }
}
