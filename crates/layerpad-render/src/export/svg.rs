//! SVG export.

use layerpad_core::layers::{Layer, paint_order};
use layerpad_core::markup::{escape_xml, format_number};
use layerpad_core::scene::CanvasSize;
use layerpad_core::shapes::Shape;

/// Markup for a single shape.
pub fn shape_to_svg(shape: &Shape) -> String {
    let fill = escape_xml(shape.fill_color());
    match shape {
        Shape::Rectangle(rect) => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" />"#,
            format_number(rect.position.x),
            format_number(rect.position.y),
            format_number(rect.width),
            format_number(rect.height),
        ),
        Shape::Circle(circle) => {
            let center = circle.center();
            format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" />"#,
                format_number(center.x),
                format_number(center.y),
                format_number(circle.radius),
            )
        }
        Shape::Triangle(triangle) => polygon(&triangle.vertices(), &fill),
        Shape::Star(star) => polygon(&star.vertices(), &fill),
    }
}

fn polygon(vertices: &[kurbo::Point], fill: &str) -> String {
    let points = vertices
        .iter()
        .map(|p| format!("{},{}", format_number(p.x), format_number(p.y)))
        .collect::<Vec<_>>()
        .join(" ");
    format!(r#"<polygon points="{points}" fill="{fill}" />"#)
}

/// Serialize the scene as a standalone SVG document, bottom layer first.
pub fn export_svg(shapes: &[Shape], layers: &[Layer], canvas_size: CanvasSize) -> String {
    let children = paint_order(shapes, layers)
        .into_iter()
        .map(shape_to_svg)
        .collect::<Vec<_>>()
        .join("\n  ");
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n  {children}\n</svg>",
        canvas_size.width, canvas_size.height
    )
}
