//! Scene store: the single writer for shapes, layers and selection.

use crate::interaction::InteractionAction;
use crate::layers::{Layer, LayerId, LayerRegistry};
use crate::shapes::{Shape, ShapeId, ShapePatch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Pan/zoom of the canvas. Not used yet: the canvas is fixed-size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// What changed in the last mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    ShapeAdded(ShapeId),
    ShapeRemoved(ShapeId),
    ShapeUpdated(ShapeId),
    SelectionChanged(Option<ShapeId>),
    LayersChanged,
}

/// Handle returned by [`SceneStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SceneChange)>;

/// Read-only copy of the scene handed to renderers and exporters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub shapes: Vec<Shape>,
    /// Layers sorted ascending by order.
    pub layers: Vec<Layer>,
    pub selected_shape_id: Option<ShapeId>,
    pub canvas_size: CanvasSize,
    /// Store revision this snapshot was taken at.
    pub revision: u64,
}

/// Authoritative scene state.
pub struct SceneStore {
    shapes: Vec<Shape>,
    selected_shape_id: Option<ShapeId>,
    canvas_size: CanvasSize,
    layers: LayerRegistry,
    /// Bumped on every mutation.
    revision: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStore")
            .field("shapes", &self.shapes)
            .field("selected_shape_id", &self.selected_shape_id)
            .field("canvas_size", &self.canvas_size)
            .field("layers", &self.layers)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl SceneStore {
    /// Create an empty scene with a fixed canvas size.
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            shapes: Vec::new(),
            selected_shape_id: None,
            canvas_size,
            layers: LayerRegistry::new(),
            revision: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// All shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Currently selected shape id.
    pub fn selected_shape_id(&self) -> Option<&str> {
        self.selected_shape_id.as_deref()
    }

    /// Canvas size (fixed at construction).
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    /// Monotonic change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Get a shape by id.
    pub fn get_shape(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Add a shape and put a new layer for it on top of the stack.
    pub fn add_shape(&mut self, shape: Shape) {
        if self.get_shape(shape.id()).is_some() {
            log::warn!("Ignoring duplicate shape id {}", shape.id());
            return;
        }
        let id = shape.id().to_string();
        let name = default_layer_name(&shape);
        self.layers.add(id.clone(), Some(&name));
        self.shapes.push(shape);
        log::debug!("Added shape {id}");
        self.commit(SceneChange::ShapeAdded(id));
    }

    /// Remove a shape and its layer; clears the selection if it was selected.
    pub fn remove_shape(&mut self, id: &str) {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id() != id);
        let had_layer = self.layers.get_by_shape_id(id).is_some();
        self.layers.remove_by_shape_id(id);
        let was_selected = self.selected_shape_id.as_deref() == Some(id);
        if was_selected {
            self.selected_shape_id = None;
        }

        if before == self.shapes.len() && !had_layer && !was_selected {
            return;
        }
        log::debug!("Removed shape {id}");
        self.commit(SceneChange::ShapeRemoved(id.to_string()));
    }

    /// Merge `patch` into a shape without changing its kind.
    pub fn update_shape(&mut self, id: &str, patch: &ShapePatch) {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) else {
            return;
        };
        shape.apply_patch(patch);
        log::trace!("Updated shape {id}");
        self.commit(SceneChange::ShapeUpdated(id.to_string()));
    }

    /// Set the selection. The id is not validated.
    pub fn select_shape(&mut self, id: Option<&str>) {
        self.selected_shape_id = id.map(str::to_string);
        self.commit(SceneChange::SelectionChanged(self.selected_shape_id.clone()));
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.select_shape(None);
    }

    /// Put a shape's layer on top of the stack.
    pub fn bring_to_front(&mut self, shape_id: &str) {
        let Some(layer_id) = self.layer_id_for(shape_id) else {
            return;
        };
        self.layers.bring_to_front(&layer_id);
        self.commit(SceneChange::LayersChanged);
    }

    /// Put a shape's layer at the bottom of the stack.
    pub fn send_to_back(&mut self, shape_id: &str) {
        let Some(layer_id) = self.layer_id_for(shape_id) else {
            return;
        };
        self.layers.send_to_back(&layer_id);
        self.commit(SceneChange::LayersChanged);
    }

    /// Layers sorted ascending by order.
    pub fn get_layers_ordered(&self) -> Vec<Layer> {
        self.layers.get_ordered()
    }

    /// Layer bound to a shape.
    pub fn get_layer_by_shape_id(&self, shape_id: &str) -> Option<&Layer> {
        self.layers.get_by_shape_id(shape_id)
    }

    /// Rename a layer.
    pub fn update_layer_name(&mut self, layer_id: &str, name: impl Into<String>) {
        if self.layers.get_layer(layer_id).is_none() {
            return;
        }
        self.layers.update_name(layer_id, name);
        self.commit(SceneChange::LayersChanged);
    }

    /// Move a layer to `order` (clamped) and renumber densely.
    pub fn reorder_layer(&mut self, layer_id: &str, order: usize) {
        if self.layers.get_layer(layer_id).is_none() {
            return;
        }
        self.layers.reorder(layer_id, order);
        self.commit(SceneChange::LayersChanged);
    }

    /// Take a read-only copy for rendering or export.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            shapes: self.shapes.clone(),
            layers: self.layers.get_ordered(),
            selected_shape_id: self.selected_shape_id.clone(),
            canvas_size: self.canvas_size,
            revision: self.revision,
        }
    }

    /// Execute an action emitted by the interaction controller.
    ///
    /// `EditShape` carries no store mutation and is ignored here.
    pub fn apply(&mut self, action: InteractionAction) {
        match action {
            InteractionAction::CreateShape(shape) => self.add_shape(shape),
            InteractionAction::SelectShape(id) => self.select_shape(id.as_deref()),
            InteractionAction::UpdateShape { id, patch } => self.update_shape(&id, &patch),
            InteractionAction::BringToFront(id) => self.bring_to_front(&id),
            InteractionAction::EditShape(_) => {}
        }
    }

    /// Register a callback invoked after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&SceneChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    fn layer_id_for(&self, shape_id: &str) -> Option<LayerId> {
        self.layers.get_by_shape_id(shape_id).map(|l| l.id.clone())
    }

    /// Bump the revision and notify subscribers once the mutation is complete.
    fn commit(&mut self, change: SceneChange) {
        self.revision += 1;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&change);
        }
    }
}

/// `"{Type} {last six chars of id}"`, e.g. `Rectangle k3j9x0`.
fn default_layer_name(shape: &Shape) -> String {
    let id = shape.id();
    let suffix_start = id
        .char_indices()
        .rev()
        .nth(5)
        .map_or(0, |(index, _)| index);
    format!("{} {}", shape.kind().display_name(), &id[suffix_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Rectangle};
    use kurbo::Point;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(id: &str, x: f64) -> Shape {
        Rectangle::new(id, Point::new(x, 100.0), 200.0, 150.0, "#3b82f6").into()
    }

    fn circle(id: &str, x: f64) -> Shape {
        Circle::new(id, Point::new(x, 100.0), 75.0, "#ff0000").into()
    }

    #[test]
    fn test_default_canvas_size() {
        let store = SceneStore::default();
        assert_eq!(store.canvas_size(), CanvasSize::new(1920, 1080));
        assert!(store.shapes().is_empty());
        assert_eq!(Viewport::default().zoom, 1.0);
    }

    #[test]
    fn test_add_creates_layers_newest_on_top() {
        let mut store = SceneStore::default();
        store.add_shape(rect("rect-1", 100.0));
        store.add_shape(rect("rect-2", 300.0));
        store.add_shape(circle("circle-1", 500.0));

        let layers = store.get_layers_ordered();
        assert_eq!(layers.len(), 3);
        let order = |id: &str| store.get_layer_by_shape_id(id).map(|l| l.order);
        assert!(order("rect-1") < order("rect-2"));
        assert!(order("rect-2") < order("circle-1"));
    }

    #[test]
    fn test_default_layer_name_uses_type_and_id_suffix() {
        let mut store = SceneStore::default();
        store.add_shape(rect("rectangle-1700000000000-abcdef123", 0.0));
        store.add_shape(circle("c1", 0.0));
        let name = |id: &str| store.get_layer_by_shape_id(id).map(|l| l.name.clone());
        assert_eq!(name("rectangle-1700000000000-abcdef123").as_deref(), Some("Rectangle def123"));
        assert_eq!(name("c1").as_deref(), Some("Circle c1"));
    }

    #[test]
    fn test_referential_integrity() {
        let mut store = SceneStore::default();
        store.add_shape(rect("a", 0.0));
        store.add_shape(circle("b", 0.0));
        store.add_shape(rect("a", 50.0));
        for shape in store.shapes() {
            let count = store
                .get_layers_ordered()
                .iter()
                .filter(|l| l.shape_id == shape.id())
                .count();
            assert_eq!(count, 1);
        }
        assert_eq!(store.shapes().len(), 2);

        store.remove_shape("a");
        assert!(store.get_layer_by_shape_id("a").is_none());
        assert_eq!(store.get_layers_ordered().len(), 1);
    }

    #[test]
    fn test_selection_clears_on_delete() {
        let mut store = SceneStore::default();
        store.add_shape(rect("x", 0.0));
        store.add_shape(rect("y", 0.0));
        store.select_shape(Some("x"));
        store.remove_shape("y");
        assert_eq!(store.selected_shape_id(), Some("x"));
        store.remove_shape("x");
        assert_eq!(store.selected_shape_id(), None);
    }

    #[test]
    fn test_update_preserves_type() {
        let mut store = SceneStore::default();
        store.add_shape(rect("r", 0.0));
        store.update_shape(
            "r",
            &ShapePatch {
                radius: Some(50.0),
                ..ShapePatch::default()
            },
        );
        let Some(Shape::Rectangle(updated)) = store.get_shape("r") else {
            panic!("rectangle lost its kind");
        };
        assert!((updated.width - 200.0).abs() < f64::EPSILON);
        assert!((updated.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_missing_shape_is_noop() {
        let mut store = SceneStore::default();
        store.add_shape(rect("r", 0.0));
        let revision = store.revision();
        store.update_shape("missing", &ShapePatch::fill("#000"));
        store.remove_shape("missing");
        store.bring_to_front("missing");
        store.update_layer_name("missing", "x");
        store.reorder_layer("missing", 0);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_bring_to_front_and_reorder() {
        let mut store = SceneStore::default();
        store.add_shape(rect("r1", 0.0));
        store.add_shape(rect("r2", 0.0));
        store.add_shape(rect("r3", 0.0));

        store.bring_to_front("r1");
        let ordered: Vec<String> = store
            .get_layers_ordered()
            .into_iter()
            .map(|l| l.shape_id)
            .collect();
        assert_eq!(ordered, vec!["r2", "r3", "r1"]);

        let layer_id = store
            .get_layer_by_shape_id("r3")
            .map(|l| l.id.clone())
            .unwrap_or_default();
        store.reorder_layer(&layer_id, 0);
        let first = store.get_layers_ordered().first().map(|l| l.shape_id.clone());
        assert_eq!(first.as_deref(), Some("r3"));

        store.send_to_back("r1");
        let first = store.get_layers_ordered().first().map(|l| l.shape_id.clone());
        assert_eq!(first.as_deref(), Some("r1"));
    }

    #[test]
    fn test_update_layer_name() {
        let mut store = SceneStore::default();
        store.add_shape(rect("r", 0.0));
        let layer_id = store
            .get_layer_by_shape_id("r")
            .map(|l| l.id.clone())
            .unwrap_or_default();
        store.update_layer_name(&layer_id, "Background");
        assert_eq!(
            store.get_layer_by_shape_id("r").map(|l| l.name.as_str()),
            Some("Background")
        );
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let mut store = SceneStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |change| sink.borrow_mut().push(change.clone()));

        store.add_shape(rect("r", 0.0));
        store.select_shape(Some("r"));
        store.update_shape("r", &ShapePatch::position(Point::new(1.0, 2.0)));
        store.unsubscribe(sub);
        store.remove_shape("r");

        assert_eq!(
            *seen.borrow(),
            vec![
                SceneChange::ShapeAdded("r".into()),
                SceneChange::SelectionChanged(Some("r".into())),
                SceneChange::ShapeUpdated("r".into()),
            ]
        );
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = SceneStore::default();
        store.add_shape(rect("r", 0.0));
        let snapshot = store.snapshot();
        store.update_shape("r", &ShapePatch::position(Point::new(9.0, 9.0)));
        assert_eq!(snapshot.shapes[0].position(), Point::new(0.0, 100.0));
        assert_ne!(snapshot.revision, store.revision());
        assert_eq!(snapshot.layers.len(), 1);
    }

    #[test]
    fn test_apply_actions() {
        let mut store = SceneStore::default();
        store.apply(InteractionAction::CreateShape(rect("r", 0.0)));
        store.apply(InteractionAction::SelectShape(Some("r".into())));
        store.apply(InteractionAction::UpdateShape {
            id: "r".into(),
            patch: ShapePatch::position(Point::new(5.0, 6.0)),
        });
        store.apply(InteractionAction::EditShape(Some("r".into())));
        assert_eq!(store.selected_shape_id(), Some("r"));
        assert_eq!(
            store.get_shape("r").map(Shape::position),
            Some(Point::new(5.0, 6.0))
        );
    }
}
