use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::drawing::DrawingErrorReport;
use crate::theme;

/// Shows the last drawing error until dismissed. The drawing itself keeps going.
pub fn drawing_error_dialog_ui(
    mut contexts: EguiContexts,
    mut report: ResMut<DrawingErrorReport>,
) -> Result {
    let Some(message) = report.message.clone() else {
        return Ok(());
    };

    egui::Window::new("Drawing Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, message.as_str());
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                report.message = None;
            }
        });

    Ok(())
}

/// Tells the user their config file could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
