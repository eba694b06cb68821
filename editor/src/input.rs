//! Marker drag gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up on a
//! marker. It carries the last sampled pointer position (moves are applied as
//! incremental deltas) and the marker's position when the gesture began, so a
//! failed save on release can put the marker back.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::model::EntityId;
use crate::transform::Point;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A marker is being dragged.
    Dragging {
        /// Placement under the pointer.
        placement_id: EntityId,
        /// Screen position of the previous pointer sample.
        last: Point,
        /// Percent position when the drag began.
        orig_x_pct: f64,
        orig_y_pct: f64,
    },
}

impl InputState {
    /// Placement currently being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging { placement_id, .. } => Some(placement_id),
        }
    }

    /// Record a new pointer sample and return the delta since the previous one.
    pub fn advance(&mut self, pointer: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Dragging { last, .. } => {
                let delta = pointer.delta_from(*last);
                *last = pointer;
                Some(delta)
            }
        }
    }
}
