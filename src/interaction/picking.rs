//! Picking: a click on the map becomes a pick position plus the drawn features under it.
//!
//! Feature lookup runs as a task on the async compute pool. A pick is delivered
//! once that task has finished, and only if its mode is still on the stack.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::EguiContexts;
use futures_lite::future;

use crate::config::AppConfig;
use crate::drawing::{PointId, UserDrawing};
use crate::params::{is_cursor_over_ui, is_typing_in_ui, CameraParams};

use super::mode::{ConsumerId, MapInteractionMode, ModeId};
use super::stack::{InteractionModeStack, MapInteractionModeStack};

/// Something already drawn that sits under a pick
#[derive(Debug, Clone, PartialEq)]
pub enum PickedFeature {
    DrawnPoint { owner: ConsumerId, point: PointId },
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickedFeatures {
    pub pick_position: Option<Vec3>,
    pub features: Vec<PickedFeature>,
}

/// A pick whose features are all available, addressed to the mode it was made in
#[derive(Message, Debug, Clone)]
pub struct PickResolved {
    pub mode: ModeId,
    pub owner: ConsumerId,
    pub picked: PickedFeatures,
}

/// Cancel/Done pressed for a mode
#[derive(Message, Debug, Clone, Copy)]
pub struct ModeCancelRequest {
    pub mode: ModeId,
}

/// Component for an in-flight feature lookup
#[derive(Component)]
pub struct PendingPick {
    pub mode: ModeId,
    pub owner: ConsumerId,
    pub task: Task<PickedFeatures>,
}

/// Point positions of every drawing at the moment of the click
#[derive(Debug, Clone, Default)]
pub struct PickSnapshot {
    entries: Vec<(ConsumerId, PointId, Vec3)>,
}

impl PickSnapshot {
    pub fn capture<'a>(drawings: impl IntoIterator<Item = &'a UserDrawing>) -> Self {
        let mut entries = Vec::new();
        for drawing in drawings {
            let Some(points) = drawing.points() else {
                continue;
            };
            entries.extend(
                points
                    .iter()
                    .map(|p| (drawing.consumer(), p.id, p.position)),
            );
        }
        Self { entries }
    }

    #[cfg(test)]
    pub fn push(&mut self, owner: ConsumerId, point: PointId, position: Vec3) {
        self.entries.push((owner, point, position));
    }

    /// Points within `radius` of `position` on the map plane, in drawing order
    pub fn features_at(&self, position: Vec3, radius: f32) -> Vec<PickedFeature> {
        let target = position.truncate();
        self.entries
            .iter()
            .filter(|(_, _, p)| p.truncate().distance(target) <= radius)
            .map(|(owner, point, _)| PickedFeature::DrawnPoint {
                owner: *owner,
                point: *point,
            })
            .collect()
    }
}

/// Mode a new click picks for. One pick at a time: the next mode is armed only
/// after the in-flight one resolves.
fn pick_target(
    stack: &MapInteractionModeStack,
    pick_in_flight: bool,
) -> Option<&MapInteractionMode> {
    if pick_in_flight {
        return None;
    }
    stack.top()
}

/// Start a pick for the top mode on left click over the map
pub fn start_pick(
    mut commands: Commands,
    mouse_button: Res<ButtonInput<MouseButton>>,
    stack: Res<MapInteractionModeStack>,
    pending: Query<(), With<PendingPick>>,
    drawings: Query<&UserDrawing>,
    config: Res<AppConfig>,
    camera: CameraParams,
    mut contexts: EguiContexts,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Some(mode) = pick_target(&stack, !pending.is_empty()) else {
        return;
    };

    if is_cursor_over_ui(&mut contexts) {
        return;
    }

    let Some(world_pos) = camera.cursor_world_pos() else {
        return;
    };

    let position = world_pos.extend(0.0);
    let radius = config.data.pick_radius * camera.zoom_scale();
    let snapshot = PickSnapshot::capture(drawings.iter());

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move {
        PickedFeatures {
            pick_position: Some(position),
            features: snapshot.features_at(position, radius),
        }
    });

    debug!("Pick started for {:?} at ({:.1}, {:.1})", mode.id, position.x, position.y);
    commands.spawn(PendingPick {
        mode: mode.id,
        owner: mode.owner,
        task,
    });
}

/// Deliver finished picks. Picks for modes that have since left the stack are dropped.
pub fn poll_pending_picks(
    mut commands: Commands,
    mut pending: Query<(Entity, &mut PendingPick)>,
    stack: Res<MapInteractionModeStack>,
    mut resolved: MessageWriter<PickResolved>,
) {
    for (entity, mut pick) in pending.iter_mut() {
        if let Some(picked) = future::block_on(future::poll_once(&mut pick.task)) {
            commands.entity(entity).despawn();

            if !stack.contains(pick.mode) {
                debug!("Dropping pick for {:?}: mode no longer active", pick.mode);
                continue;
            }

            resolved.write(PickResolved {
                mode: pick.mode,
                owner: pick.owner,
                picked,
            });
        }
    }
}

/// Drop every in-flight pick
pub fn cancel_pending_picks(commands: &mut Commands, pending: &Query<Entity, With<PendingPick>>) {
    for entity in pending.iter() {
        commands.entity(entity).despawn();
    }
}

fn cancel_target(
    stack: &MapInteractionModeStack,
    escape_pressed: bool,
    typing: bool,
) -> Option<ModeId> {
    // Escape inside a text field belongs to the field
    if !escape_pressed || typing {
        return None;
    }
    stack.top().map(|mode| mode.id)
}

/// Escape cancels whatever mode is on top
pub fn handle_cancel_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    stack: Res<MapInteractionModeStack>,
    mut cancel_events: MessageWriter<ModeCancelRequest>,
    mut contexts: EguiContexts,
) {
    let escape_pressed = keyboard.just_pressed(KeyCode::Escape);
    if !escape_pressed {
        return;
    }
    if let Some(mode) = cancel_target(&stack, escape_pressed, is_typing_in_ui(&mut contexts)) {
        cancel_events.write(ModeCancelRequest { mode });
    }
}
