//! Hit-testing over a layered scene.

use crate::layers::Layer;
use crate::shapes::Shape;
use kurbo::Point;
use std::collections::{HashMap, HashSet};

/// Find the visually topmost shape containing `point`.
///
/// Layered shapes are tested from the highest order down. Shapes without a
/// layer are only tested after every layered shape missed, in collection order.
pub fn shape_at_point<'a>(
    shapes: &'a [Shape],
    layers: &[Layer],
    point: Point,
) -> Option<&'a Shape> {
    let by_id: HashMap<&str, &Shape> = shapes.iter().map(|s| (s.id(), s)).collect();

    let mut top_down: Vec<&Layer> = layers.iter().collect();
    top_down.sort_by_key(|l| std::cmp::Reverse(l.order));

    let layered_hit = top_down
        .into_iter()
        .filter_map(|l| by_id.get(l.shape_id.as_str()).copied())
        .find(|s| s.hit_test(point));
    if layered_hit.is_some() {
        return layered_hit;
    }

    let layered: HashSet<&str> = layers.iter().map(|l| l.shape_id.as_str()).collect();
    shapes
        .iter()
        .filter(|s| !layered.contains(s.id()))
        .find(|s| s.hit_test(point))
}
