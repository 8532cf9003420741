//! The interaction-mode stack: whoever is on top receives the next pick.

use bevy::prelude::*;

use super::mode::{ConsumerId, MapInteractionMode, ModeId, ModeRequest};

/// Push/pop contract consumers use to claim pick input.
pub trait InteractionModeStack {
    fn push(&mut self, request: ModeRequest) -> ModeId;
    fn pop(&mut self) -> Option<MapInteractionMode>;
    /// Remove a specific mode wherever it sits in the stack
    fn remove(&mut self, id: ModeId) -> Option<MapInteractionMode>;
    fn top(&self) -> Option<&MapInteractionMode>;
}

#[derive(Resource, Default, Debug)]
pub struct MapInteractionModeStack {
    modes: Vec<MapInteractionMode>,
    next_id: u64,
}

impl MapInteractionModeStack {
    pub fn contains(&self, id: ModeId) -> bool {
        self.modes.iter().any(|m| m.id == id)
    }

    #[cfg(test)]
    pub fn owner_of(&self, id: ModeId) -> Option<ConsumerId> {
        self.modes.iter().find(|m| m.id == id).map(|m| m.owner)
    }

    /// Number of modes owned by `owner`
    #[cfg(test)]
    pub fn count_owned_by(&self, owner: ConsumerId) -> usize {
        self.modes.iter().filter(|m| m.owner == owner).count()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl InteractionModeStack for MapInteractionModeStack {
    fn push(&mut self, request: ModeRequest) -> ModeId {
        let id = ModeId(self.next_id);
        self.next_id += 1;
        debug!("Pushing interaction mode {:?} for {:?}", id, request.owner);
        self.modes.push(MapInteractionMode::new(id, request));
        id
    }

    fn pop(&mut self) -> Option<MapInteractionMode> {
        self.modes.pop()
    }

    fn remove(&mut self, id: ModeId) -> Option<MapInteractionMode> {
        let index = self.modes.iter().position(|m| m.id == id)?;
        Some(self.modes.remove(index))
    }

    fn top(&self) -> Option<&MapInteractionMode> {
        self.modes.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::mode::DialogMessage;

    fn request(owner: u64, button: &str) -> ModeRequest {
        ModeRequest {
            owner: ConsumerId(owner),
            message: DialogMessage::default(),
            button_text: button.to_string(),
        }
    }

    #[test]
    fn test_stack_default_is_empty() {
        let stack = MapInteractionModeStack::default();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut stack = MapInteractionModeStack::default();
        let a = stack.push(request(1, "Cancel"));
        let b = stack.push(request(1, "Done"));
        assert!(b > a);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().map(|m| m.id), Some(b));
    }

    #[test]
    fn test_pop_returns_last_pushed() {
        let mut stack = MapInteractionModeStack::default();
        stack.push(request(1, "first"));
        stack.push(request(2, "second"));
        let popped = stack.pop().unwrap();
        assert_eq!(popped.button_text, "second");
        assert_eq!(stack.top().unwrap().button_text, "first");
    }

    #[test]
    fn test_remove_from_middle() {
        let mut stack = MapInteractionModeStack::default();
        let a = stack.push(request(1, "a"));
        let b = stack.push(request(2, "b"));
        let c = stack.push(request(3, "c"));

        assert_eq!(stack.remove(b).map(|m| m.owner), Some(ConsumerId(2)));
        assert!(!stack.contains(b));
        assert!(stack.contains(a));
        assert_eq!(stack.top().map(|m| m.id), Some(c));
        assert!(stack.remove(b).is_none());
    }

    #[test]
    fn test_owner_lookup() {
        let mut stack = MapInteractionModeStack::default();
        let a = stack.push(request(5, "a"));
        assert_eq!(stack.owner_of(a), Some(ConsumerId(5)));
        assert_eq!(stack.count_owned_by(ConsumerId(5)), 1);
        assert_eq!(stack.count_owned_by(ConsumerId(6)), 0);
        assert!(stack.owner_of(ModeId(99)).is_none());
    }
}
