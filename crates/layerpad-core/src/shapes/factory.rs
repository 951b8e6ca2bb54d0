//! Default-sized shape construction.

use super::{Circle, Rectangle, Shape, ShapeId, ShapeKind, Star, Triangle};
use crate::ids::unique_id;
use kurbo::Point;

/// Position used when no explicit position is given.
pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);

/// Default rectangle size and color.
pub const RECTANGLE_DEFAULTS: (f64, f64, &str) = (200.0, 150.0, "#3b82f6");

/// Default circle radius and color.
pub const CIRCLE_DEFAULTS: (f64, &str) = (75.0, "#22c55e");

/// Default triangle size and color.
pub const TRIANGLE_DEFAULTS: (f64, f64, &str) = (150.0, 150.0, "#f97316");

/// Default star outer radius, inner radius, tip count and color.
pub const STAR_DEFAULTS: (f64, f64, u32, &str) = (60.0, 30.0, 5, "#eab308");

/// Create a default-sized shape of `kind` with its top-left corner at `position`.
pub fn create_shape(kind: ShapeKind, id: impl Into<ShapeId>, position: Point) -> Shape {
    match kind {
        ShapeKind::Rectangle => {
            let (width, height, fill) = RECTANGLE_DEFAULTS;
            Rectangle::new(id, position, width, height, fill).into()
        }
        ShapeKind::Circle => {
            let (radius, fill) = CIRCLE_DEFAULTS;
            Circle::new(id, position, radius, fill).into()
        }
        ShapeKind::Triangle => {
            let (width, height, fill) = TRIANGLE_DEFAULTS;
            Triangle::new(id, position, width, height, fill).into()
        }
        ShapeKind::Star => {
            let (outer, inner, points, fill) = STAR_DEFAULTS;
            Star::new(id, position, outer, inner, points, fill).into()
        }
    }
}

/// Generate a fresh id of the form `{type}-{timestamp}-{random}`.
pub fn generate_shape_id(kind: ShapeKind) -> ShapeId {
    unique_id(kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTrait;

    #[test]
    fn test_default_rectangle() {
        let shape = create_shape(ShapeKind::Rectangle, "rect-1", Point::new(100.0, 100.0));
        let Shape::Rectangle(rect) = shape else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, Point::new(100.0, 100.0));
        assert!((rect.width - 200.0).abs() < f64::EPSILON);
        assert!((rect.height - 150.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill_color, "#3b82f6");
    }

    #[test]
    fn test_every_kind_round_trips_its_tag() {
        let kinds = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Star];
        for kind in kinds {
            let shape = create_shape(kind, generate_shape_id(kind), DEFAULT_POSITION);
            assert_eq!(shape.kind(), kind);
            assert_eq!(shape.position(), DEFAULT_POSITION);
        }
    }

    #[test]
    fn test_default_star() {
        let Shape::Star(star) = create_shape(ShapeKind::Star, "s", DEFAULT_POSITION) else {
            panic!("expected a star");
        };
        assert_eq!(star.points, 5);
        assert!((star.outer_radius - 60.0).abs() < f64::EPSILON);
        assert!((star.inner_radius - 30.0).abs() < f64::EPSILON);
        assert_eq!(star.fill_color(), "#eab308");
    }

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = generate_shape_id(ShapeKind::Circle);
        let b = generate_shape_id(ShapeKind::Circle);
        assert!(a.starts_with("circle-"));
        assert_eq!(a.split('-').count(), 3);
        assert_ne!(a, b);
    }
}
