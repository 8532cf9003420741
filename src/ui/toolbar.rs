use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, SetAllowPolygonRequest, SetGridVisibleRequest};
use crate::drawing::{DrawingTool, FinishDrawingRequest, StartDrawingRequest, UserDrawing};
use crate::params::is_typing_in_ui;
use crate::theme;

/// Main toolbar: tool buttons and drawing settings
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    config: Res<AppConfig>,
    tools: Query<(&DrawingTool, &UserDrawing)>,
    mut start_events: MessageWriter<StartDrawingRequest>,
    mut finish_events: MessageWriter<FinishDrawingRequest>,
    mut polygon_events: MessageWriter<SetAllowPolygonRequest>,
    mut grid_events: MessageWriter<SetGridVisibleRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for tool in DrawingTool::all() {
                    let active = tools
                        .iter()
                        .any(|(t, drawing)| t == tool && drawing.is_active());

                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool)).size(14.0).strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(active);

                    let response = ui.add(button);
                    if response.clicked() {
                        if active {
                            finish_events.write(FinishDrawingRequest { tool: *tool });
                        } else {
                            start_events.write(StartDrawingRequest { tool: *tool });
                        }
                    }
                    response.on_hover_text(tool_hover_text(tool, active));
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let mut allow_polygon = config.data.allow_polygon;
                if ui
                    .checkbox(&mut allow_polygon, "Polygons")
                    .on_hover_text("Click the first point to close the shape (applies to new drawings)")
                    .changed()
                {
                    polygon_events.write(SetAllowPolygonRequest {
                        allow: allow_polygon,
                    });
                }

                let mut grid_visible = config.data.grid_visible;
                if ui.checkbox(&mut grid_visible, "Grid").changed() {
                    grid_events.write(SetGridVisibleRequest {
                        visible: grid_visible,
                    });
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for (tool, drawing) in tools.iter().filter(|(_, d)| d.is_active()) {
                        ui.colored_label(
                            theme::ui::ACTIVE_TOOL,
                            format!("{}: {} points", tool.display_name(), drawing.point_count()),
                        );
                    }
                });
            });
        });
    Ok(())
}

/// Keyboard shortcuts to start tools
pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut start_events: MessageWriter<StartDrawingRequest>,
    mut contexts: EguiContexts,
) {
    // Don't start tools while typing in a text field
    if is_typing_in_ui(&mut contexts) {
        return;
    }

    let tool = if keyboard.just_pressed(KeyCode::KeyD) {
        Some(DrawingTool::Draw)
    } else if keyboard.just_pressed(KeyCode::KeyM) {
        Some(DrawingTool::Measure)
    } else {
        None
    };

    if let Some(tool) = tool {
        start_events.write(StartDrawingRequest { tool });
    }
}

fn tool_button_label(tool: &DrawingTool) -> &'static str {
    match tool {
        DrawingTool::Draw => "Draw [D]",
        DrawingTool::Measure => "Measure [M]",
    }
}

fn tool_hover_text(tool: &DrawingTool, active: bool) -> String {
    if active {
        format!("Stop {}", tool.display_name().to_lowercase())
    } else {
        format!("Start {}", tool.display_name().to_lowercase())
    }
}
