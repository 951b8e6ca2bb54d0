//! A drawing session: scene store, interaction controller and live renderer
//! wired together.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::layer_panel::LayerPanelDrag;
use layerpad_core::input::PointerEvent;
use layerpad_core::interaction::{InteractionAction, InteractionController, InteractionView};
use layerpad_core::scene::SceneStore;
use layerpad_core::shapes::{ShapeId, ShapePatch};
use layerpad_core::tools::ToolKind;
use layerpad_render::{PixmapSurface, RenderEngine, export_png, export_svg, fill_color};
use std::time::Duration;

/// Pointer gestures on the canvas element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Click(PointerEvent),
    MouseDown(PointerEvent),
    MouseMove(PointerEvent),
    MouseUp,
    DoubleClick(PointerEvent),
}

/// Headless editor state.
pub struct Session {
    store: SceneStore,
    controller: InteractionController,
    engine: RenderEngine<PixmapSurface>,
    /// Shape the last double-click asked to edit.
    editing_shape_id: Option<ShapeId>,
    layer_drag: Option<LayerPanelDrag>,
    /// Session clock, advanced explicitly by the host.
    clock: Duration,
    background_color: String,
}

impl Session {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let canvas_size = config.canvas_size();
        let engine = RenderEngine::new(canvas_size)?
            .with_clear_color(fill_color(&config.background_color));
        Ok(Self {
            store: SceneStore::new(canvas_size),
            controller: InteractionController::new(canvas_size),
            engine,
            editing_shape_id: None,
            layer_drag: None,
            clock: Duration::ZERO,
            background_color: config.background_color.clone(),
        })
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    pub fn engine(&self) -> &RenderEngine<PixmapSurface> {
        &self.engine
    }

    pub fn tool(&self) -> ToolKind {
        self.controller.tool()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {tool}");
        self.controller.set_tool(tool);
    }

    /// Shape currently open for editing.
    pub fn editing_shape_id(&self) -> Option<&str> {
        self.editing_shape_id.as_deref()
    }

    /// Elapsed session time.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Advance the session clock.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
    }

    /// Route a gesture through the controller, apply what it emits, then
    /// repaint. Returns the applied action.
    pub fn dispatch(&mut self, event: GestureEvent) -> Option<InteractionAction> {
        let snapshot = self.store.snapshot();
        let view = InteractionView::from(&snapshot);
        let action = match event {
            GestureEvent::Click(pointer) => self.controller.handle_click(&pointer, view),
            GestureEvent::MouseDown(pointer) => self.controller.handle_mouse_down(&pointer, view),
            GestureEvent::MouseMove(pointer) => self.controller.handle_mouse_move(&pointer),
            GestureEvent::MouseUp => {
                self.controller.handle_mouse_up();
                None
            }
            GestureEvent::DoubleClick(pointer) => {
                self.controller.handle_double_click(&pointer, view)
            }
        };

        if let Some(action) = &action {
            if let InteractionAction::EditShape(id) = action {
                self.editing_shape_id.clone_from(id);
            }
            self.store.apply(action.clone());
        }
        self.refresh();
        action
    }

    /// Save an edit to the shape open for editing and close the edit.
    /// Returns whether a shape was open.
    ///
    /// Fields that do not exist on the shape's variant are ignored.
    pub fn apply_edit(&mut self, patch: &ShapePatch) -> bool {
        let Some(id) = self.editing_shape_id.take() else {
            return false;
        };
        self.store.update_shape(&id, patch);
        self.refresh();
        true
    }

    /// Close the edit without saving.
    pub fn cancel_edit(&mut self) {
        self.editing_shape_id = None;
    }

    /// Remove the selected shape. Returns whether anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.store.selected_shape_id().map(str::to_string) else {
            return false;
        };
        self.store.remove_shape(&id);
        if self.editing_shape_id.as_deref() == Some(id.as_str()) {
            self.editing_shape_id = None;
        }
        self.refresh();
        true
    }

    /// Rename the layer of `shape_id`.
    pub fn rename_layer(&mut self, shape_id: &str, name: &str) {
        let Some(layer_id) = self.layer_id_of(shape_id) else {
            log::warn!("No layer for shape {shape_id}");
            return;
        };
        self.store.update_layer_name(&layer_id, name);
        self.refresh();
    }

    /// Move the layer of `shape_id` to `order`.
    pub fn reorder_layer(&mut self, shape_id: &str, order: usize) {
        let Some(layer_id) = self.layer_id_of(shape_id) else {
            log::warn!("No layer for shape {shape_id}");
            return;
        };
        self.store.reorder_layer(&layer_id, order);
        self.refresh();
    }

    /// Begin dragging the layer-panel row of `shape_id`.
    pub fn begin_layer_drag(&mut self, shape_id: &str) {
        self.layer_drag = self.layer_id_of(shape_id).map(LayerPanelDrag::start);
    }

    /// Move the layer-panel drag to `relative_y`. Returns whether a reorder
    /// was applied.
    pub fn drag_layer_to(&mut self, relative_y: f64) -> bool {
        let now = self.clock;
        let layers = self.store.get_layers_ordered();
        let Some(drag) = self.layer_drag.as_mut() else {
            return false;
        };
        let Some(order) = drag.drag_to(relative_y, &layers, now) else {
            return false;
        };
        let layer_id = drag.layer_id().to_string();
        self.store.reorder_layer(&layer_id, order);
        self.refresh();
        true
    }

    pub fn end_layer_drag(&mut self) {
        self.layer_drag = None;
    }

    /// Current scene as an SVG document.
    pub fn export_svg(&self) -> String {
        let snapshot = self.store.snapshot();
        export_svg(&snapshot.shapes, &snapshot.layers, snapshot.canvas_size)
    }

    /// Current scene as a PNG data URL over the configured background.
    pub fn export_png(&self) -> AppResult<String> {
        let snapshot = self.store.snapshot();
        Ok(export_png(
            &snapshot.shapes,
            &snapshot.layers,
            snapshot.canvas_size,
            &self.background_color,
        )?)
    }

    /// Stop the live renderer.
    pub fn close(&mut self) {
        self.engine.destroy();
    }

    fn layer_id_of(&self, shape_id: &str) -> Option<String> {
        self.store
            .get_layer_by_shape_id(shape_id)
            .map(|layer| layer.id.clone())
    }

    fn refresh(&mut self) {
        self.engine.observe(&self.store.snapshot());
        self.engine.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use layerpad_core::shapes::{Shape, ShapeKind};

    fn session() -> Session {
        Session::new(&AppConfig::default()).unwrap()
    }

    fn at(x: f64, y: f64) -> PointerEvent {
        PointerEvent::at(Point::new(x, y), AppConfig::default().canvas_size())
    }

    #[test]
    fn test_create_via_click() {
        let mut session = session();
        session.set_tool(ToolKind::Rectangle);
        session.dispatch(GestureEvent::Click(at(100.0, 100.0)));

        let shapes = session.store().shapes();
        assert_eq!(shapes.len(), 1);
        let Shape::Rectangle(rect) = &shapes[0] else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, Point::new(100.0, 100.0));
        assert!((rect.width - 200.0).abs() < f64::EPSILON);
        assert!((rect.height - 150.0).abs() < f64::EPSILON);
        assert_eq!(rect.fill_color, "#3b82f6");

        let top = session.store().get_layers_ordered().last().map(|l| l.shape_id.clone());
        assert_eq!(top.as_deref(), Some(shapes[0].id()));
        assert_eq!(session.store().selected_shape_id(), None);
        assert_eq!(session.engine().surface().pixel(150, 150), Some([59, 130, 246, 255]));
    }

    #[test]
    fn test_drag_moves_shape() {
        let mut session = session();
        session.set_tool(ToolKind::Rectangle);
        session.dispatch(GestureEvent::Click(at(100.0, 100.0)));
        session.set_tool(ToolKind::Select);
        session.dispatch(GestureEvent::Click(at(120.0, 120.0)));
        let id = session.store().selected_shape_id().map(str::to_string);
        assert!(id.is_some());

        session.dispatch(GestureEvent::MouseDown(at(110.0, 110.0)));
        session.dispatch(GestureEvent::MouseMove(at(160.0, 140.0)));
        session.dispatch(GestureEvent::MouseUp);

        let moved = id.as_deref().and_then(|id| session.store().get_shape(id));
        assert_eq!(moved.map(Shape::position), Some(Point::new(150.0, 130.0)));
    }

    #[test]
    fn test_double_click_sets_editing_shape() {
        let mut session = session();
        session.set_tool(ToolKind::Circle);
        session.dispatch(GestureEvent::Click(at(0.0, 0.0)));
        session.set_tool(ToolKind::Select);

        session.dispatch(GestureEvent::DoubleClick(at(75.0, 75.0)));
        let circle_id = session.store().shapes()[0].id().to_string();
        assert_eq!(session.editing_shape_id(), Some(circle_id.as_str()));

        session.dispatch(GestureEvent::DoubleClick(at(1000.0, 1000.0)));
        assert_eq!(session.editing_shape_id(), None);
    }

    #[test]
    fn test_apply_edit_updates_and_closes() {
        let mut session = session();
        let edit = ShapePatch {
            radius: Some(40.0),
            fill_color: Some("#ff0000".to_string()),
            ..ShapePatch::default()
        };
        assert!(!session.apply_edit(&edit));

        session.set_tool(ToolKind::Circle);
        session.dispatch(GestureEvent::Click(at(0.0, 0.0)));
        session.set_tool(ToolKind::Select);
        session.dispatch(GestureEvent::DoubleClick(at(75.0, 75.0)));
        assert!(session.apply_edit(&edit));
        assert_eq!(session.editing_shape_id(), None);

        let Shape::Circle(circle) = &session.store().shapes()[0] else {
            panic!("edit changed the shape kind");
        };
        assert!((circle.radius - 40.0).abs() < f64::EPSILON);
        assert_eq!(circle.fill_color, "#ff0000");
        assert_eq!(session.engine().surface().pixel(40, 40), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_apply_edit_ignores_foreign_fields() {
        let mut session = session();
        session.set_tool(ToolKind::Rectangle);
        session.dispatch(GestureEvent::Click(at(10.0, 10.0)));
        session.set_tool(ToolKind::Select);
        session.dispatch(GestureEvent::DoubleClick(at(20.0, 20.0)));

        let edit = ShapePatch {
            radius: Some(5.0),
            outer_radius: Some(9.0),
            width: Some(50.0),
            ..ShapePatch::default()
        };
        assert!(session.apply_edit(&edit));
        let Shape::Rectangle(rect) = &session.store().shapes()[0] else {
            panic!("edit changed the shape kind");
        };
        assert!((rect.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.height - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cancel_edit() {
        let mut session = session();
        session.set_tool(ToolKind::Star);
        session.dispatch(GestureEvent::Click(at(0.0, 0.0)));
        session.set_tool(ToolKind::Select);
        session.dispatch(GestureEvent::DoubleClick(at(10.0, 10.0)));
        assert!(session.editing_shape_id().is_some());
        session.cancel_edit();
        assert!(!session.apply_edit(&ShapePatch::fill("#000000")));
        assert_eq!(session.store().shapes()[0].fill_color(), "#eab308");
    }

    #[test]
    fn test_delete_selected() {
        let mut session = session();
        assert!(!session.delete_selected());
        session.set_tool(ToolKind::Star);
        session.dispatch(GestureEvent::Click(at(10.0, 10.0)));
        session.set_tool(ToolKind::Select);
        session.dispatch(GestureEvent::Click(at(20.0, 20.0)));
        assert!(session.delete_selected());
        assert!(session.store().shapes().is_empty());
        assert!(session.store().get_layers_ordered().is_empty());
        assert_eq!(session.store().selected_shape_id(), None);
    }

    #[test]
    fn test_layer_panel_drag_is_throttled() {
        let mut session = session();
        for kind in [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle] {
            session.set_tool(kind.into());
            session.dispatch(GestureEvent::Click(at(10.0, 10.0)));
        }
        let bottom = session.store().get_layers_ordered()[0].shape_id.clone();

        session.begin_layer_drag(&bottom);
        assert!(session.drag_layer_to(5.0));
        assert!(!session.drag_layer_to(45.0));
        session.advance(Duration::from_millis(50));
        assert!(session.drag_layer_to(45.0));
        session.end_layer_drag();
        assert!(!session.drag_layer_to(5.0));

        let order = session.store().get_layer_by_shape_id(&bottom).map(|l| l.order);
        assert_eq!(order, Some(1));
    }

    #[test]
    fn test_exports() {
        let mut session = session();
        session.set_tool(ToolKind::Circle);
        session.dispatch(GestureEvent::Click(at(100.0, 100.0)));
        assert!(
            session
                .export_svg()
                .contains(r##"<circle cx="175" cy="175" r="75" fill="#22c55e" />"##)
        );
        assert!(session.export_png().unwrap().starts_with("data:image/png;base64,"));

        session.close();
        assert!(session.engine().is_destroyed());
    }
}
