//! Layerpad Core Library
//!
//! Platform-agnostic scene model for Layerpad: shapes, the layer stack, the
//! scene store and the pointer interaction controller.

mod ids;

pub mod geometry;
pub mod input;
pub mod interaction;
pub mod layers;
pub mod markup;
pub mod scene;
pub mod shapes;
pub mod text_image;
pub mod tools;

pub use geometry::shape_at_point;
pub use input::PointerEvent;
pub use interaction::{InteractionAction, InteractionController, InteractionView};
pub use layers::{Layer, LayerId, LayerRegistry, paint_order};
pub use scene::{CanvasSize, SceneChange, SceneSnapshot, SceneStore, SubscriptionId, Viewport};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapePatch, ShapeTrait};
pub use tools::ToolKind;
