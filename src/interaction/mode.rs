//! Interaction mode requests pushed onto the mode stack.

use std::fmt;

/// Identifier of one pushed interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModeId(pub u64);

/// Identifier of the consumer that owns a mode and receives its picks and cancels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsumerId(pub u64);

/// Text shown in the prompt dialog while a mode is on top of the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogMessage {
    /// Heading, rendered emphasised
    pub header: String,
    /// Optional extra lines supplied by the consumer (e.g. a measured distance)
    pub body: Vec<String>,
    /// Instruction for the next user action
    pub instruction: String,
}

impl DialogMessage {
    /// All lines in display order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.header.as_str())
            .chain(self.body.iter().map(String::as_str))
            .chain(std::iter::once(self.instruction.as_str()))
    }
}

impl fmt::Display for DialogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for line in self.lines() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
            first = false;
        }
        Ok(())
    }
}

/// A request for pick input, as handed to [`super::InteractionModeStack::push`].
#[derive(Debug, Clone)]
pub struct ModeRequest {
    pub owner: ConsumerId,
    pub message: DialogMessage,
    pub button_text: String,
}

/// A mode that has been pushed and given an id.
#[derive(Debug, Clone)]
pub struct MapInteractionMode {
    pub id: ModeId,
    pub owner: ConsumerId,
    pub message: DialogMessage,
    pub button_text: String,
}

impl MapInteractionMode {
    pub fn new(id: ModeId, request: ModeRequest) -> Self {
        Self {
            id,
            owner: request.owner,
            message: request.message,
            button_text: request.button_text,
        }
    }
}
