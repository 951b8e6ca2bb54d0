//! Scripted gesture replay.
//!
//! A script is a JSON array of steps, each tagged by `action`:
//!
//! ```json
//! [
//!   { "action": "tool", "tool": "rectangle" },
//!   { "action": "click", "x": 100, "y": 100 },
//!   { "action": "tool", "tool": "select" },
//!   { "action": "mouse_down", "x": 120, "y": 120 },
//!   { "action": "mouse_move", "x": 180, "y": 150 },
//!   { "action": "mouse_up" }
//! ]
//! ```
//!
//! Pointer coordinates are canvas pixels.

use crate::error::AppResult;
use crate::session::{GestureEvent, Session};
use kurbo::Point;
use layerpad_core::input::PointerEvent;
use layerpad_core::shapes::{ShapeId, ShapePatch};
use layerpad_core::tools::ToolKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Tool { tool: ToolKind },
    Click { x: f64, y: f64 },
    MouseDown { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
    MouseUp,
    DoubleClick { x: f64, y: f64 },
    DeleteSelected,
    /// Save fields on the shape opened by the last double-click.
    EditShape { patch: ShapePatch },
    CancelEdit,
    RenameLayer { shape_id: ShapeId, name: String },
    ReorderLayer { shape_id: ShapeId, order: usize },
    LayerDragStart { shape_id: ShapeId },
    /// Pointer offset from the top of the layer list.
    LayerDragMove { y: f64 },
    LayerDragEnd,
    Wait { ms: u64 },
}

/// A sequence of steps replayed against a [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GestureScript {
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order.
    pub fn replay(&self, session: &mut Session) {
        for step in &self.steps {
            log::trace!("Step: {step:?}");
            run_step(session, step);
        }
        log::info!("Replayed {} steps", self.steps.len());
    }
}

fn run_step(session: &mut Session, step: &ScriptStep) {
    let size = session.store().canvas_size();
    let pointer = |x: f64, y: f64| PointerEvent::at(Point::new(x, y), size);

    match step {
        ScriptStep::Tool { tool } => session.set_tool(*tool),
        ScriptStep::Click { x, y } => {
            session.dispatch(GestureEvent::Click(pointer(*x, *y)));
        }
        ScriptStep::MouseDown { x, y } => {
            session.dispatch(GestureEvent::MouseDown(pointer(*x, *y)));
        }
        ScriptStep::MouseMove { x, y } => {
            session.dispatch(GestureEvent::MouseMove(pointer(*x, *y)));
        }
        ScriptStep::MouseUp => {
            session.dispatch(GestureEvent::MouseUp);
        }
        ScriptStep::DoubleClick { x, y } => {
            session.dispatch(GestureEvent::DoubleClick(pointer(*x, *y)));
        }
        ScriptStep::DeleteSelected => {
            session.delete_selected();
        }
        ScriptStep::EditShape { patch } => {
            session.apply_edit(patch);
        }
        ScriptStep::CancelEdit => session.cancel_edit(),
        ScriptStep::RenameLayer { shape_id, name } => session.rename_layer(shape_id, name),
        ScriptStep::ReorderLayer { shape_id, order } => session.reorder_layer(shape_id, *order),
        ScriptStep::LayerDragStart { shape_id } => session.begin_layer_drag(shape_id),
        ScriptStep::LayerDragMove { y } => {
            session.drag_layer_to(*y);
        }
        ScriptStep::LayerDragEnd => session.end_layer_drag(),
        ScriptStep::Wait { ms } => session.advance(Duration::from_millis(*ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use layerpad_core::shapes::ShapeKind;

    const DRAW_AND_DRAG: &str = r#"[
        { "action": "tool", "tool": "rectangle" },
        { "action": "click", "x": 100, "y": 100 },
        { "action": "tool", "tool": "circle" },
        { "action": "click", "x": 500, "y": 500 },
        { "action": "tool", "tool": "select" },
        { "action": "click", "x": 120, "y": 120 },
        { "action": "mouse_down", "x": 120, "y": 120 },
        { "action": "mouse_move", "x": 170, "y": 140 },
        { "action": "mouse_up" },
        { "action": "click", "x": 170, "y": 140 },
        { "action": "wait", "ms": 16 }
    ]"#;

    #[test]
    fn test_parse_steps() {
        let script = GestureScript::from_json(DRAW_AND_DRAG).unwrap();
        assert_eq!(script.len(), 11);
        assert_eq!(script.steps[0], ScriptStep::Tool { tool: ToolKind::Rectangle });
        assert_eq!(script.steps[8], ScriptStep::MouseUp);
        assert!(GestureScript::from_json(r#"[{ "action": "fly" }]"#).is_err());
    }

    #[test]
    fn test_replay_draw_and_drag() {
        let mut session = Session::new(&AppConfig::default()).unwrap();
        GestureScript::from_json(DRAW_AND_DRAG).unwrap().replay(&mut session);

        let store = session.store();
        assert_eq!(store.shapes().len(), 2);
        let rect = store
            .shapes()
            .iter()
            .find(|s| s.kind() == ShapeKind::Rectangle)
            .unwrap();
        assert_eq!(rect.position(), Point::new(150.0, 120.0));
        // The drag brought the rectangle to the front.
        let top = store.get_layers_ordered().last().map(|l| l.shape_id.clone());
        assert_eq!(top.as_deref(), Some(rect.id()));
        // The click right after the drag was swallowed, so selection stays.
        assert_eq!(store.selected_shape_id(), Some(rect.id()));
        assert_eq!(session.now(), Duration::from_millis(16));
    }

    #[test]
    fn test_replay_edit_step() {
        let mut session = Session::new(&AppConfig::default()).unwrap();
        GestureScript::from_json(
            r#"[
                { "action": "tool", "tool": "circle" },
                { "action": "click", "x": 100, "y": 100 },
                { "action": "tool", "tool": "select" },
                { "action": "double_click", "x": 175, "y": 175 },
                { "action": "edit_shape", "patch": { "radius": 20, "width": 300, "x": 50 } }
            ]"#,
        )
        .unwrap()
        .replay(&mut session);

        let circle = &session.store().shapes()[0];
        assert_eq!(circle.kind(), ShapeKind::Circle);
        assert_eq!(circle.position(), Point::new(50.0, 100.0));
        assert_eq!(circle.bounds().width(), 40.0);
        assert_eq!(session.editing_shape_id(), None);
    }

    #[test]
    fn test_replay_layer_steps() {
        let mut session = Session::new(&AppConfig::default()).unwrap();
        GestureScript::from_json(
            r#"[
                { "action": "tool", "tool": "triangle" },
                { "action": "click", "x": 0, "y": 0 },
                { "action": "tool", "tool": "star" },
                { "action": "click", "x": 300, "y": 300 }
            ]"#,
        )
        .unwrap()
        .replay(&mut session);

        let triangle = session.store().shapes()[0].id().to_string();
        let script = GestureScript {
            steps: vec![
                ScriptStep::RenameLayer {
                    shape_id: triangle.clone(),
                    name: "Roof".to_string(),
                },
                ScriptStep::LayerDragStart {
                    shape_id: triangle.clone(),
                },
                ScriptStep::LayerDragMove { y: 0.0 },
                ScriptStep::LayerDragEnd,
            ],
        };
        script.replay(&mut session);

        let layer = session.store().get_layer_by_shape_id(&triangle).unwrap();
        assert_eq!(layer.name, "Roof");
        assert_eq!(layer.order, 1);
    }
}
