//! Drawing-context abstraction and the paint routines shared by the live
//! renderer and the PNG exporter.

use crate::error::RenderResult;
use kurbo::{BezPath, Shape as KurboShape, Stroke};
use layerpad_core::layers::{Layer, paint_order};
use layerpad_core::scene::CanvasSize;
use layerpad_core::shapes::Shape;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Outward padding of the selection outline, in pixels.
pub const SELECTION_PADDING: f64 = 4.0;

/// Stroke width of the selection outline.
pub const SELECTION_STROKE_WIDTH: f64 = 2.0;

/// On/off lengths of the selection outline dashes.
pub const SELECTION_DASHES: [f64; 2] = [5.0, 5.0];

/// Flattening tolerance used when converting primitives to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Minimal drawing context: everything a scene needs is a clear, a fill and a
/// stroke over a path.
pub trait Painter {
    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Color);

    /// Fill `path` (non-zero winding) with `color`.
    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Stroke `path` with `stroke`, honoring its dash pattern.
    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color);
}

/// A painter backed by a fixed-size drawing surface.
pub trait Surface: Painter + Sized {
    /// Allocate a surface of `size` pixels.
    fn acquire(size: CanvasSize) -> RenderResult<Self>;

    /// Size the surface was acquired with.
    fn size(&self) -> CanvasSize;
}

/// Selection highlight color (`#3b82f6`).
pub fn selection_color() -> Color {
    Color::from_rgba8(59, 130, 246, 255)
}

/// Parse a CSS color string (`#rgb`, `#rrggbb`, `rgb(...)`, named colors, ...).
pub fn parse_css_color(css: &str) -> Option<Color> {
    parse_color(css.trim())
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}

/// Resolve a shape fill, falling back to opaque black like a canvas whose
/// fill style was never set.
pub fn fill_color(css: &str) -> Color {
    parse_css_color(css).unwrap_or_else(|| {
        log::warn!("Unparsable fill color {css:?}, painting black");
        Color::from_rgba8(0, 0, 0, 255)
    })
}

/// Paint one shape.
pub fn paint_shape<P: Painter + ?Sized>(painter: &mut P, shape: &Shape) {
    painter.fill_path(&shape.to_path(), fill_color(shape.fill_color()));
}

/// Paint `shapes` bottom to top: ascending layer order, then shapes without a
/// layer in collection order.
pub fn paint_shapes<P: Painter + ?Sized>(painter: &mut P, shapes: &[Shape], layers: &[Layer]) {
    for shape in paint_order(shapes, layers) {
        paint_shape(painter, shape);
    }
}

/// Outline path drawn around a selected shape.
pub fn selection_outline(shape: &Shape) -> BezPath {
    shape
        .bounds()
        .inflate(SELECTION_PADDING, SELECTION_PADDING)
        .to_path(PATH_TOLERANCE)
}

/// Paint the dashed selection outline around `shape`.
pub fn paint_selection<P: Painter + ?Sized>(painter: &mut P, shape: &Shape) {
    let stroke = Stroke::new(SELECTION_STROKE_WIDTH).with_dashes(0.0, SELECTION_DASHES);
    painter.stroke_path(&selection_outline(shape), &stroke, selection_color());
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};
    use layerpad_core::layers::LayerRegistry;
    use layerpad_core::shapes::{Circle, Rectangle};

    /// Records every call so paint order can be asserted without pixels.
    #[derive(Default)]
    struct RecordingPainter {
        fills: Vec<(Rect, [u8; 4])>,
        strokes: Vec<(Rect, f64, Vec<f64>)>,
    }

    impl Painter for RecordingPainter {
        fn clear(&mut self, _color: Color) {
            self.fills.clear();
            self.strokes.clear();
        }

        fn fill_path(&mut self, path: &BezPath, color: Color) {
            let rgba = color.to_rgba8();
            self.fills.push((path.bounding_box(), [rgba.r, rgba.g, rgba.b, rgba.a]));
        }

        fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, _color: Color) {
            self.strokes.push((path.bounding_box(), stroke.width, stroke.dash_pattern.to_vec()));
        }
    }

    #[test]
    fn test_parse_css_color() {
        let blue = parse_css_color("#3b82f6").map(|c| c.to_rgba8());
        assert_eq!(blue.map(|c| (c.r, c.g, c.b, c.a)), Some((59, 130, 246, 255)));
        let red = parse_css_color("red").map(|c| c.to_rgba8());
        assert_eq!(red.map(|c| (c.r, c.g, c.b)), Some((255, 0, 0)));
        assert!(parse_css_color("not-a-color").is_none());
    }

    #[test]
    fn test_unparsable_fill_is_black() {
        let rgba = fill_color("definitely not a color").to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0, 0, 0, 255));
    }

    #[test]
    fn test_paint_shapes_follows_layers() {
        let shapes: Vec<Shape> = vec![
            Circle::new("c", Point::new(0.0, 0.0), 10.0, "#00ff00").into(),
            Rectangle::new("r", Point::new(50.0, 50.0), 10.0, 10.0, "#ff0000").into(),
        ];
        let mut layers = LayerRegistry::new();
        layers.add("r", None);
        layers.add("c", None);

        let mut painter = RecordingPainter::default();
        paint_shapes(&mut painter, &shapes, &layers.get_ordered());
        let colors: Vec<[u8; 4]> = painter.fills.iter().map(|(_, c)| *c).collect();
        assert_eq!(colors, vec![[255, 0, 0, 255], [0, 255, 0, 255]]);
    }

    #[test]
    fn test_selection_outline_geometry() {
        let shape: Shape =
            Rectangle::new("r", Point::new(100.0, 100.0), 200.0, 150.0, "#000").into();
        assert_eq!(selection_outline(&shape).bounding_box(), Rect::new(96.0, 96.0, 304.0, 254.0));

        let mut painter = RecordingPainter::default();
        paint_selection(&mut painter, &shape);
        let (_, width, dashes) = &painter.strokes[0];
        assert!((width - 2.0).abs() < f64::EPSILON);
        assert_eq!(dashes, &vec![5.0, 5.0]);
    }
}
