//! Layer registry: the z-order stack binding each shape to a rank.
//!
//! Lower `order` values are painted first and therefore sit visually below
//! higher ones. Orders are dense (`0..n`) after every reorder; plain removal
//! may leave gaps, which sorting by order tolerates.

use crate::ids::unique_id;
use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Unique identifier for layers.
pub type LayerId = String;

/// A shape's position in the layer stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    /// The shape this layer orders (non-owning reference).
    pub shape_id: ShapeId,
    /// User-editable display name.
    pub name: String,
    /// Rank in the stack; lower renders first.
    pub order: usize,
}

/// Owns every layer and keeps the stack consistent.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    /// Layers in insertion order. The order-sorted view is computed on demand.
    layers: Vec<Layer>,
    /// Shape id -> layer id.
    by_shape: HashMap<ShapeId, LayerId>,
}

impl LayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the registry has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All layers in insertion order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Add a layer for `shape_id` on top of the stack and return its id.
    ///
    /// A shape has at most one layer: adding a shape that already has one
    /// returns the existing layer id unchanged.
    pub fn add(&mut self, shape_id: impl Into<ShapeId>, name: Option<&str>) -> LayerId {
        let shape_id = shape_id.into();
        if let Some(existing) = self.by_shape.get(&shape_id) {
            return existing.clone();
        }

        let order = self.max_order().map_or(0, |max| max + 1);
        let id = unique_id("layer");
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("Layer {}", self.layers.len() + 1),
        };

        self.by_shape.insert(shape_id.clone(), id.clone());
        self.layers.push(Layer {
            id: id.clone(),
            shape_id,
            name,
            order,
        });
        id
    }

    /// Remove a layer by id. Remaining orders are not renumbered.
    pub fn remove(&mut self, layer_id: &str) {
        if let Some(index) = self.index_of(layer_id) {
            let layer = self.layers.remove(index);
            self.by_shape.remove(&layer.shape_id);
        }
    }

    /// Remove the layer bound to `shape_id`, if any.
    pub fn remove_by_shape_id(&mut self, shape_id: &str) {
        if let Some(layer_id) = self.by_shape.remove(shape_id) {
            self.layers.retain(|l| l.id != layer_id);
        }
    }

    /// Get a layer by id.
    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }

    /// Get the layer bound to a shape.
    pub fn get_by_shape_id(&self, shape_id: &str) -> Option<&Layer> {
        let layer_id = self.by_shape.get(shape_id)?;
        self.get_layer(layer_id)
    }

    /// All layers sorted ascending by order (stable for equal orders).
    pub fn get_ordered(&self) -> Vec<Layer> {
        let mut ordered = self.layers.clone();
        ordered.sort_by_key(|l| l.order);
        ordered
    }

    /// Rename a layer.
    pub fn update_name(&mut self, layer_id: &str, name: impl Into<String>) {
        if let Some(layer) = self.layer_mut(layer_id) {
            layer.name = name.into();
        }
    }

    /// Move a layer to `target` (clamped to `0..len`) and renumber every layer
    /// densely by its new position.
    pub fn reorder(&mut self, layer_id: &str, target: usize) {
        let Some(current_order) = self.get_layer(layer_id).map(|l| l.order) else {
            return;
        };
        let clamped = target.min(self.layers.len() - 1);

        let mut sequence: Vec<LayerId> = self.get_ordered().into_iter().map(|l| l.id).collect();
        let Some(position) = sequence.iter().position(|id| id == layer_id) else {
            return;
        };
        // Already in place with a matching rank. Sorted positions and ranks can
        // only disagree after a removal left gaps, in which case we renumber.
        if current_order == clamped && position == clamped {
            return;
        }

        let moved = sequence.remove(position);
        sequence.insert(clamped, moved);

        let ranks: HashMap<LayerId, usize> = sequence
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        for layer in &mut self.layers {
            if let Some(&rank) = ranks.get(&layer.id) {
                layer.order = rank;
            }
        }
        log::trace!("Reordered layer {layer_id} to {clamped}");
    }

    /// Put a layer above every other layer.
    pub fn bring_to_front(&mut self, layer_id: &str) {
        if let Some(max) = self.max_order() {
            self.reorder(layer_id, max + 1);
        }
    }

    /// Put a layer below every other layer, shifting the layers that were
    /// below it up by one.
    pub fn send_to_back(&mut self, layer_id: &str) {
        let Some(current) = self.get_layer(layer_id).map(|l| l.order) else {
            return;
        };
        for layer in &mut self.layers {
            if layer.id == layer_id {
                layer.order = 0;
            } else if layer.order < current {
                layer.order += 1;
            }
        }
    }

    /// Move a layer one rank up.
    pub fn move_up(&mut self, layer_id: &str) {
        if let Some(order) = self.get_layer(layer_id).map(|l| l.order) {
            self.reorder(layer_id, order + 1);
        }
    }

    /// Move a layer one rank down.
    pub fn move_down(&mut self, layer_id: &str) {
        if let Some(order) = self.get_layer(layer_id).map(|l| l.order) {
            if order > 0 {
                self.reorder(layer_id, order - 1);
            }
        }
    }

    fn max_order(&self) -> Option<usize> {
        self.layers.iter().map(|l| l.order).max()
    }

    fn index_of(&self, layer_id: &str) -> Option<usize> {
        self.layers.iter().position(|l| l.id == layer_id)
    }

    fn layer_mut(&mut self, layer_id: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == layer_id)
    }
}

/// Shapes in paint order: ascending layer order, then any shape without a
/// layer in collection order.
///
/// This is the ordering rule shared by the live renderer and both exporters.
pub fn paint_order<'a>(shapes: &'a [Shape], layers: &[Layer]) -> Vec<&'a Shape> {
    let by_id: HashMap<&str, &Shape> = shapes.iter().map(|s| (s.id(), s)).collect();

    let mut sorted: Vec<&Layer> = layers.iter().collect();
    sorted.sort_by_key(|l| l.order);

    let mut ordered: Vec<&Shape> = sorted
        .iter()
        .filter_map(|l| by_id.get(l.shape_id.as_str()).copied())
        .collect();

    let layered: HashSet<&str> = layers.iter().map(|l| l.shape_id.as_str()).collect();
    ordered.extend(shapes.iter().filter(|s| !layered.contains(s.id())));
    ordered
}
