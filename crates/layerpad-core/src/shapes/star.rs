//! Star shape.

use super::{ShapeId, ShapeKind, ShapePatch, ShapeTrait};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A star polygon with alternating outer and inner vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub(crate) id: ShapeId,
    /// Top-left corner of the outer bounding square.
    pub position: Point,
    /// Radius of the tips.
    pub outer_radius: f64,
    /// Radius of the notches between tips.
    pub inner_radius: f64,
    /// Number of tips.
    pub points: u32,
    /// CSS fill color.
    pub fill_color: String,
}

impl Star {
    /// Create a new star.
    pub fn new(
        id: impl Into<ShapeId>,
        position: Point,
        outer_radius: f64,
        inner_radius: f64,
        points: u32,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            outer_radius,
            inner_radius,
            points,
            fill_color: fill_color.into(),
        }
    }

    /// Create a five-pointed star whose inner radius is half the outer radius.
    pub fn with_outer_radius(
        id: impl Into<ShapeId>,
        position: Point,
        outer_radius: f64,
        fill_color: impl Into<String>,
    ) -> Self {
        Self::new(id, position, outer_radius, outer_radius * 0.5, 5, fill_color)
    }

    /// Center derived from the top-left corner.
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.outer_radius,
            self.position.y + self.outer_radius,
        )
    }

    /// Number of polygon vertices, `points * 2`.
    pub fn vertex_count(&self) -> u64 {
        u64::from(self.points) * 2
    }

    /// The polygon vertices, starting at angle 0 and sweeping by
    /// `PI / points`, alternating outer and inner radius.
    pub fn vertices(&self) -> Vec<Point> {
        let center = self.center();
        (0..self.vertex_count())
            .map(|i| {
                let angle = i as f64 * PI / f64::from(self.points);
                let radius = if i % 2 == 0 {
                    self.outer_radius
                } else {
                    self.inner_radius
                };
                Point::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                )
            })
            .collect()
    }
}

impl ShapeTrait for Star {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Star
    }

    fn position(&self) -> Point {
        self.position
    }

    fn fill_color(&self) -> &str {
        &self.fill_color
    }

    fn bounds(&self) -> Rect {
        let size = self.outer_radius * 2.0;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + size,
            self.position.y + size,
        )
    }

    /// Bounding-box approximation: the notches between tips count as hits.
    fn hit_test(&self, point: Point) -> bool {
        let size = self.outer_radius * 2.0;
        point.x >= self.position.x
            && point.x <= self.position.x + size
            && point.y >= self.position.y
            && point.y <= self.position.y + size
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut vertices = self.vertices().into_iter();
        if let Some(first) = vertices.next() {
            path.move_to(first);
            for vertex in vertices {
                path.line_to(vertex);
            }
            path.close_path();
        }
        path
    }

    fn apply_patch(&mut self, patch: &ShapePatch) {
        patch.apply_common(&mut self.position, &mut self.fill_color);
        if let Some(outer) = patch.outer_radius {
            self.outer_radius = outer;
        }
        if let Some(inner) = patch.inner_radius {
            self.inner_radius = inner;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_and_first_tip() {
        let star = Star::new("s", Point::new(0.0, 0.0), 60.0, 30.0, 5, "#eab308");
        let vertices = star.vertices();
        assert_eq!(vertices.len(), 10);
        // First vertex is the outer tip at angle 0 (to the right of center).
        assert!((vertices[0].x - 120.0).abs() < 1e-9);
        assert!((vertices[0].y - 60.0).abs() < 1e-9);
        // Second vertex sits on the inner radius.
        assert!((vertices[1].distance(star.center()) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_inner_radius() {
        let star = Star::with_outer_radius("s", Point::new(0.0, 0.0), 40.0, "#000");
        assert!((star.inner_radius - 20.0).abs() < f64::EPSILON);
        assert_eq!(star.points, 5);
    }

    #[test]
    fn test_hit_test_uses_bounding_box() {
        let star = Star::new("s", Point::new(0.0, 0.0), 60.0, 30.0, 5, "#000");
        // The corner of the bounding square lies outside the star polygon but
        // still counts as a hit.
        assert!(star.hit_test(Point::new(1.0, 1.0)));
        assert!(star.hit_test(Point::new(120.0, 120.0)));
        assert!(!star.hit_test(Point::new(121.0, 60.0)));
    }

    #[test]
    fn test_zero_points_has_empty_path() {
        let star = Star::new("s", Point::new(0.0, 0.0), 60.0, 30.0, 0, "#000");
        assert!(star.vertices().is_empty());
        assert!(star.to_path().elements().is_empty());
    }

    #[test]
    fn test_vertex_count_does_not_overflow() {
        let star = Star::new("s", Point::new(0.0, 0.0), 60.0, 30.0, 5, "#000");
        assert_eq!(star.vertex_count(), 10);
        assert_eq!(star.vertices().len(), 10);

        let huge = Star::new("s", Point::new(0.0, 0.0), 60.0, 30.0, u32::MAX, "#000");
        assert_eq!(huge.vertex_count(), 8_589_934_590);
    }
}
