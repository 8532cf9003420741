mod dialogs;
mod mode_dialog;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, toolbar::handle_tool_shortcuts)
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Top panel first, then the windows that float over the map
                    toolbar::toolbar_ui,
                    mode_dialog::mode_dialog_ui,
                    dialogs::drawing_error_dialog_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .chain(),
            );
    }
}
