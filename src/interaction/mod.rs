mod mode;
mod picking;
mod stack;

pub use mode::{ConsumerId, DialogMessage, MapInteractionMode, ModeId, ModeRequest};
pub use picking::{
    cancel_pending_picks, ModeCancelRequest, PendingPick, PickResolved, PickSnapshot,
    PickedFeature, PickedFeatures,
};
pub use stack::{InteractionModeStack, MapInteractionModeStack};

use bevy::prelude::*;

/// Systems that turn clicks into resolved picks and cancel requests.
/// Consumers read [`PickResolved`] and [`ModeCancelRequest`] after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PickSystems;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapInteractionModeStack>()
            .add_message::<PickResolved>()
            .add_message::<ModeCancelRequest>()
            .add_systems(
                Update,
                (
                    picking::handle_cancel_shortcut,
                    picking::start_pick,
                    picking::poll_pending_picks,
                )
                    .chain()
                    .in_set(PickSystems),
            );
    }
}
