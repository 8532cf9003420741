//! Prompt for the interaction mode on top of the stack.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::interaction::{InteractionModeStack, MapInteractionModeStack, ModeCancelRequest};
use crate::theme;

pub fn mode_dialog_ui(
    mut contexts: EguiContexts,
    stack: Res<MapInteractionModeStack>,
    mut cancel_events: MessageWriter<ModeCancelRequest>,
) -> Result {
    let Some(mode) = stack.top() else {
        return Ok(());
    };

    egui::Window::new("Map Interaction")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 60.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(egui::RichText::new(&mode.message.header).strong().size(15.0));
            for line in &mode.message.body {
                ui.colored_label(theme::ui::LABEL_TEXT, line.as_str());
            }
            ui.colored_label(theme::ui::HINT_TEXT, mode.message.instruction.as_str());
            ui.add_space(6.0);
            if ui.button(mode.button_text.as_str()).clicked() {
                cancel_events.write(ModeCancelRequest { mode: mode.id });
            }
        });

    Ok(())
}
