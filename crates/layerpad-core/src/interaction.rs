//! Interaction controller: turns pointer gestures into scene actions.
//!
//! The controller never touches the store. Each handler inspects a borrowed
//! [`InteractionView`] and returns the action the host should apply, usually
//! through [`SceneStore::apply`](crate::scene::SceneStore::apply).

use crate::geometry::shape_at_point;
use crate::input::PointerEvent;
use crate::layers::Layer;
use crate::scene::{CanvasSize, SceneSnapshot};
use crate::shapes::{Shape, ShapeId, ShapePatch, create_shape, generate_shape_id};
use crate::tools::ToolKind;
use kurbo::{Point, Vec2};

/// Movement (in canvas pixels, per axis) after which a press counts as a drag.
pub const DRAG_THRESHOLD: f64 = 2.0;

/// Read-only scene state the controller decides against.
#[derive(Debug, Clone, Copy)]
pub struct InteractionView<'a> {
    pub shapes: &'a [Shape],
    pub layers: &'a [Layer],
    pub selected_shape_id: Option<&'a str>,
}

impl<'a> InteractionView<'a> {
    pub fn new(
        shapes: &'a [Shape],
        layers: &'a [Layer],
        selected_shape_id: Option<&'a str>,
    ) -> Self {
        Self {
            shapes,
            layers,
            selected_shape_id,
        }
    }
}

impl<'a> From<&'a SceneSnapshot> for InteractionView<'a> {
    fn from(snapshot: &'a SceneSnapshot) -> Self {
        Self::new(
            &snapshot.shapes,
            &snapshot.layers,
            snapshot.selected_shape_id.as_deref(),
        )
    }
}

/// Requests emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionAction {
    /// A shape tool click produced a new shape.
    CreateShape(Shape),
    /// Select the hit shape, or clear the selection on a miss.
    SelectShape(Option<ShapeId>),
    /// Move a shape during a drag.
    UpdateShape { id: ShapeId, patch: ShapePatch },
    /// Double-click asked to edit the hit shape (or nothing).
    EditShape(Option<ShapeId>),
    /// A drag started on this shape.
    BringToFront(ShapeId),
}

/// In-progress drag of the selected shape.
#[derive(Debug, Clone, PartialEq)]
struct DragState {
    shape_id: ShapeId,
    /// Pointer position at mouse-down.
    pointer_origin: Point,
    /// Shape top-left at mouse-down.
    shape_origin: Point,
}

/// Transient gesture state for one canvas element.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    tool: ToolKind,
    canvas_size: CanvasSize,
    drag: Option<DragState>,
    /// Set once a drag moves past the threshold; swallows the next click.
    suppress_click: bool,
}

impl InteractionController {
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            canvas_size,
            ..Self::default()
        }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools. Any drag in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.drag = None;
    }

    /// Check if a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Single click: create a shape with a shape tool, or select with the
    /// select tool.
    ///
    /// The first click after a completed drag is swallowed.
    pub fn handle_click(
        &mut self,
        event: &PointerEvent,
        view: InteractionView<'_>,
    ) -> Option<InteractionAction> {
        if self.suppress_click {
            self.suppress_click = false;
            log::trace!("Click after drag suppressed");
            return None;
        }

        let point = event.to_canvas_point(self.canvas_size);
        match self.tool.shape_kind() {
            Some(kind) => {
                let shape = create_shape(kind, generate_shape_id(kind), point);
                log::debug!("Creating {kind} at ({}, {})", point.x, point.y);
                Some(InteractionAction::CreateShape(shape))
            }
            None => {
                let hit = shape_at_point(view.shapes, view.layers, point);
                Some(InteractionAction::SelectShape(hit.map(|s| s.id().to_string())))
            }
        }
    }

    /// Mouse-down: start dragging the selected shape if the press lands on it.
    pub fn handle_mouse_down(
        &mut self,
        event: &PointerEvent,
        view: InteractionView<'_>,
    ) -> Option<InteractionAction> {
        if self.tool != ToolKind::Select {
            return None;
        }
        let selected_id = view.selected_shape_id?;
        let selected = view.shapes.iter().find(|s| s.id() == selected_id)?;

        let point = event.to_canvas_point(self.canvas_size);
        if !selected.hit_test(point) {
            return None;
        }

        self.drag = Some(DragState {
            shape_id: selected_id.to_string(),
            pointer_origin: point,
            shape_origin: selected.position(),
        });
        log::trace!("Drag started on {selected_id}");
        Some(InteractionAction::BringToFront(selected_id.to_string()))
    }

    /// Mouse-move: move the dragged shape by the pointer delta.
    pub fn handle_mouse_move(&mut self, event: &PointerEvent) -> Option<InteractionAction> {
        let drag = self.drag.as_ref()?;
        let point = event.to_canvas_point(self.canvas_size);
        let delta: Vec2 = point - drag.pointer_origin;

        if delta.x.abs() > DRAG_THRESHOLD || delta.y.abs() > DRAG_THRESHOLD {
            self.suppress_click = true;
        }

        Some(InteractionAction::UpdateShape {
            id: drag.shape_id.clone(),
            patch: ShapePatch::position(drag.shape_origin + delta),
        })
    }

    /// Mouse-up: end any drag. The click suppression flag survives until the
    /// next click consumes it.
    pub fn handle_mouse_up(&mut self) {
        if self.drag.take().is_some() {
            log::trace!("Drag ended");
        }
    }

    /// Double-click: request editing of the hit shape (select tool only).
    pub fn handle_double_click(
        &mut self,
        event: &PointerEvent,
        view: InteractionView<'_>,
    ) -> Option<InteractionAction> {
        if self.tool != ToolKind::Select {
            return None;
        }
        let point = event.to_canvas_point(self.canvas_size);
        let hit = shape_at_point(view.shapes, view.layers, point);
        Some(InteractionAction::EditShape(hit.map(|s| s.id().to_string())))
    }
}
