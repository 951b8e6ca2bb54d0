//! Layer panel drag-to-reorder.
//!
//! The panel lists layers top-down (highest order first) in fixed-height rows.
//! Dragging a row maps the pointer's offset into the list to a target order.

use layerpad_core::layers::{Layer, LayerId};
use std::time::Duration;

/// Height of one row in the layer list, in pixels.
pub const LAYER_ITEM_HEIGHT: f64 = 40.0;

/// Minimum spacing between two reorders during one drag.
pub const REORDER_INTERVAL: Duration = Duration::from_millis(50);

/// Admits at most one event per interval.
#[derive(Debug, Clone)]
pub struct ReorderThrottle {
    interval: Duration,
    last: Option<Duration>,
}

impl Default for ReorderThrottle {
    fn default() -> Self {
        Self::new(REORDER_INTERVAL)
    }
}

impl ReorderThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Check whether an event at `now` may go through. Admitted events start a
    /// new interval.
    pub fn admit(&mut self, now: Duration) -> bool {
        if !self.is_open(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Check whether an event at `now` would be admitted, without recording it.
    pub fn is_open(&self, now: Duration) -> bool {
        self.last
            .is_none_or(|last| now.saturating_sub(last) >= self.interval)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Target order for a pointer `relative_y` pixels below the top of a list of
/// `layer_count` rows, or `None` for an empty list.
pub fn target_order(relative_y: f64, layer_count: usize) -> Option<usize> {
    let last = layer_count.checked_sub(1)?;
    let hover = (relative_y / LAYER_ITEM_HEIGHT).floor();
    let row = if hover.is_nan() || hover < 0.0 {
        0
    } else {
        (hover as usize).min(last)
    };
    Some(last - row)
}

/// An in-progress row drag.
#[derive(Debug, Clone)]
pub struct LayerPanelDrag {
    layer_id: LayerId,
    throttle: ReorderThrottle,
}

impl LayerPanelDrag {
    /// Start dragging `layer_id`.
    pub fn start(layer_id: impl Into<LayerId>) -> Self {
        Self {
            layer_id: layer_id.into(),
            throttle: ReorderThrottle::default(),
        }
    }

    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// Pointer moved to `relative_y` at time `now`. Returns the reorder to
    /// apply, if the pointer is over another row and the throttle allows it.
    ///
    /// `layers` must be sorted ascending by order.
    pub fn drag_to(&mut self, relative_y: f64, layers: &[Layer], now: Duration) -> Option<usize> {
        if !self.throttle.is_open(now) {
            return None;
        }
        let target = target_order(relative_y, layers.len())?;
        let current = layers.iter().position(|l| l.id == self.layer_id)?;
        if current == target {
            return None;
        }
        self.throttle.admit(now);
        Some(target)
    }
}
