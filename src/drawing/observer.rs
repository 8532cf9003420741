//! Ways for callers to follow a drawing: synchronous observers and ECS messages.

use bevy::prelude::*;

use crate::interaction::ConsumerId;

use super::points::PointSet;
use super::shape::ShapeState;

/// Listener attached to a [`super::UserDrawing`]. A drawing may have any number.
///
/// All methods have empty defaults so observers only implement what they need.
pub trait DrawingObserver: Send + Sync + 'static {
    /// A point was added or removed, or the loop was closed.
    /// The point set must be treated as read-only.
    fn on_points_changed(&mut self, _points: &PointSet, _shape: &ShapeState) {}

    /// The session finished, by cancel or done
    fn on_clean_up(&mut self) {}

    /// Extra line for the prompt dialog. Empty strings are not shown.
    fn dialog_message(&self, _points: &PointSet, _shape: &ShapeState) -> String {
        String::new()
    }
}

/// Emitted once per change, after the drawing's state has been updated.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum DrawingEvent {
    Started {
        drawing: ConsumerId,
    },
    PointsChanged {
        drawing: ConsumerId,
        point_count: usize,
        closed: bool,
    },
    CleanedUp {
        drawing: ConsumerId,
    },
}
