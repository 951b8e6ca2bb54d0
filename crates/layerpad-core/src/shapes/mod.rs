//! Shape definitions for the canvas.

mod circle;
mod factory;
mod rectangle;
mod star;
mod triangle;

pub use circle::Circle;
pub use factory::{
    CIRCLE_DEFAULTS, DEFAULT_POSITION, RECTANGLE_DEFAULTS, STAR_DEFAULTS, TRIANGLE_DEFAULTS,
    create_shape, generate_shape_id,
};
pub use rectangle::Rectangle;
pub use star::Star;
pub use triangle::Triangle;

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for shapes (opaque string, e.g. `rectangle-1700000000000-k3j9x0a2b`).
pub type ShapeId = String;

/// Discriminant of the shape union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
}

impl ShapeKind {
    /// Lowercase tag used in ids and markup.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Star => "star",
        }
    }

    /// Capitalized name used for default layer names.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Star => "Star",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update for a shape.
///
/// Only the fields that exist on the target variant are applied; the rest are
/// ignored, so a patch can never change a shape's kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub fill_color: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub outer_radius: Option<f64>,
    pub inner_radius: Option<f64>,
    pub points: Option<u32>,
}

impl ShapePatch {
    /// Patch that moves a shape's top-left corner.
    pub fn position(point: Point) -> Self {
        Self {
            x: Some(point.x),
            y: Some(point.y),
            ..Self::default()
        }
    }

    /// Patch that only changes the fill color.
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill_color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Check if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the fields every variant shares.
    fn apply_common(&self, position: &mut Point, fill_color: &mut String) {
        if let Some(x) = self.x {
            position.x = x;
        }
        if let Some(y) = self.y {
            position.y = y;
        }
        if let Some(color) = &self.fill_color {
            fill_color.clone_from(color);
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    /// Get the shape's discriminant.
    fn kind(&self) -> ShapeKind;

    /// Top-left corner of the bounding box.
    fn position(&self) -> Point;

    /// CSS fill color.
    fn fill_color(&self) -> &str;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point) -> bool;

    /// Get the outline path used for painting.
    fn to_path(&self) -> BezPath;

    /// Merge the fields of `patch` that this variant understands.
    fn apply_patch(&mut self, patch: &ShapePatch);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Star(Star),
}

impl Shape {
    pub fn id(&self) -> &str {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Triangle(s) => s.id(),
            Shape::Star(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(s) => s.kind(),
            Shape::Circle(s) => s.kind(),
            Shape::Triangle(s) => s.kind(),
            Shape::Star(s) => s.kind(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Circle(s) => s.position(),
            Shape::Triangle(s) => s.position(),
            Shape::Star(s) => s.position(),
        }
    }

    pub fn fill_color(&self) -> &str {
        match self {
            Shape::Rectangle(s) => s.fill_color(),
            Shape::Circle(s) => s.fill_color(),
            Shape::Triangle(s) => s.fill_color(),
            Shape::Star(s) => s.fill_color(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Triangle(s) => s.bounds(),
            Shape::Star(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Circle(s) => s.hit_test(point),
            Shape::Triangle(s) => s.hit_test(point),
            Shape::Star(s) => s.hit_test(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Triangle(s) => s.to_path(),
            Shape::Star(s) => s.to_path(),
        }
    }

    pub fn apply_patch(&mut self, patch: &ShapePatch) {
        match self {
            Shape::Rectangle(s) => s.apply_patch(patch),
            Shape::Circle(s) => s.apply_patch(patch),
            Shape::Triangle(s) => s.apply_patch(patch),
            Shape::Star(s) => s.apply_patch(patch),
        }
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Circle> for Shape {
    fn from(shape: Circle) -> Self {
        Shape::Circle(shape)
    }
}

impl From<Triangle> for Shape {
    fn from(shape: Triangle) -> Self {
        Shape::Triangle(shape)
    }
}

impl From<Star> for Shape {
    fn from(shape: Star) -> Self {
        Shape::Star(shape)
    }
}
