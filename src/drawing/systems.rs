//! ECS side of drawing: starting tools, routing picks and cancels, publishing events.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};

use crate::config::{AppConfig, DrawConfigData};
use crate::constants::MEASURE_MESSAGE_HEADER;
use crate::interaction::{
    cancel_pending_picks, InteractionModeStack, MapInteractionModeStack, ModeCancelRequest,
    PendingPick, PickResolved,
};

use super::measure::DistanceMeasurer;
use super::observer::DrawingEvent;
use super::session::{DrawingError, UserDrawing, UserDrawingOptions};

/// Which tool a drawing entity belongs to
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawingTool {
    Draw,
    Measure,
}

impl DrawingTool {
    pub fn all() -> &'static [DrawingTool] {
        &[DrawingTool::Draw, DrawingTool::Measure]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DrawingTool::Draw => "Draw",
            DrawingTool::Measure => "Measure",
        }
    }

    /// A fresh drawing for this tool with options taken from `config`
    pub fn build(&self, config: &DrawConfigData) -> UserDrawing {
        match self {
            DrawingTool::Draw => UserDrawing::new(config.drawing_options()),
            DrawingTool::Measure => UserDrawing::new(UserDrawingOptions {
                message_header: MEASURE_MESSAGE_HEADER.to_string(),
                allow_polygon: config.allow_polygon,
            })
            .with_observer(DistanceMeasurer),
        }
    }
}

/// Message to start a tool. Ignored while that tool is already drawing.
#[derive(Message, Debug, Clone, Copy)]
pub struct StartDrawingRequest {
    pub tool: DrawingTool,
}

/// Message to end a tool's drawing without the dialog
#[derive(Message, Debug, Clone, Copy)]
pub struct FinishDrawingRequest {
    pub tool: DrawingTool,
}

/// Last drawing error, shown in the error dialog until dismissed
#[derive(Resource, Default, Debug)]
pub struct DrawingErrorReport {
    pub message: Option<String>,
}

impl DrawingErrorReport {
    pub fn report(&mut self, error: &DrawingError) {
        error!("Drawing error: {}", error);
        self.message = Some(error.to_string());
    }
}

/// Spawn a new drawing for each start request and put it in draw mode
pub fn start_drawing(
    mut commands: Commands,
    mut requests: MessageReader<StartDrawingRequest>,
    stack: Option<ResMut<MapInteractionModeStack>>,
    tools: Query<(Entity, &DrawingTool, &UserDrawing)>,
    pending: Query<Entity, With<PendingPick>>,
    config: Res<AppConfig>,
    mut report: ResMut<DrawingErrorReport>,
) {
    let Some(mut stack) = stack else {
        if requests.read().next().is_some() {
            report.report(&DrawingError::MissingHost("Interaction mode stack"));
        }
        requests.clear();
        return;
    };

    let mut started: Vec<DrawingTool> = Vec::new();
    for request in requests.read() {
        let busy = started.contains(&request.tool)
            || tools
                .iter()
                .any(|(_, tool, drawing)| *tool == request.tool && drawing.is_active());
        if busy {
            debug!("{} is already drawing", request.tool.display_name());
            continue;
        }

        // Sessions are never reused: the finished drawing is replaced
        for (entity, tool, _) in tools.iter() {
            if *tool == request.tool {
                commands.entity(entity).despawn();
            }
        }

        cancel_pending_picks(&mut commands, &pending);

        let mut drawing = request.tool.build(&config.data);
        drawing.enter_draw_mode(&mut *stack);
        commands.spawn((request.tool, drawing));
        started.push(request.tool);
    }
}

/// Hand each resolved pick to the drawing that owns its mode
pub fn route_picks(
    mut picks: MessageReader<PickResolved>,
    mut stack: ResMut<MapInteractionModeStack>,
    mut drawings: Query<&mut UserDrawing>,
    mut report: ResMut<DrawingErrorReport>,
) {
    for pick in picks.read() {
        let Some(mut drawing) = drawings.iter_mut().find(|d| d.consumer() == pick.owner) else {
            debug!("No drawing for pick owner {:?}", pick.owner);
            continue;
        };

        if let Err(e) = drawing.handle_pick(&mut *stack, pick.mode, &pick.picked) {
            report.report(&e);
        }
    }
}

/// Cancel/Done: clean up the owning drawing, or drop an orphaned mode
pub fn route_cancels(
    mut cancels: MessageReader<ModeCancelRequest>,
    mut stack: ResMut<MapInteractionModeStack>,
    mut drawings: Query<&mut UserDrawing>,
) {
    for request in cancels.read() {
        // The drawing armed with this mode cleans up even if the mode already left the stack
        if let Some(mut drawing) = drawings
            .iter_mut()
            .find(|d| d.active_mode() == Some(request.mode))
        {
            drawing.cancel(&mut *stack, request.mode);
            continue;
        }

        if stack.contains(request.mode) {
            warn!("Removing orphaned interaction mode {:?}", request.mode);
            stack.remove(request.mode);
        }
    }
}

pub fn finish_drawing(
    mut requests: MessageReader<FinishDrawingRequest>,
    mut stack: ResMut<MapInteractionModeStack>,
    mut drawings: Query<(&DrawingTool, &mut UserDrawing)>,
) {
    for request in requests.read() {
        for (tool, mut drawing) in drawings.iter_mut() {
            if *tool == request.tool && drawing.is_active() {
                drawing.finish(&mut *stack);
            }
        }
    }
}

/// Publish the events each drawing queued this frame
pub fn flush_drawing_events(
    mut drawings: Query<&mut UserDrawing>,
    mut events: MessageWriter<DrawingEvent>,
) {
    for mut drawing in drawings.iter_mut() {
        events.write_batch(drawing.drain_events());
    }
}

/// Crosshair while any drawing is active, default cursor otherwise
pub fn update_draw_cursor(
    mut commands: Commands,
    mut events: MessageReader<DrawingEvent>,
    window_query: Query<Entity, With<PrimaryWindow>>,
    drawings: Query<&UserDrawing>,
) {
    let lifecycle_changed = events.read().fold(false, |changed, event| {
        changed || !matches!(event, DrawingEvent::PointsChanged { .. })
    });
    if !lifecycle_changed {
        return;
    }

    let Ok(window_entity) = window_query.single() else {
        return;
    };

    let icon = if drawings.iter().any(UserDrawing::is_active) {
        SystemCursorIcon::Crosshair
    } else {
        SystemCursorIcon::Default
    };
    commands
        .entity(window_entity)
        .insert(CursorIcon::System(icon));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::drawing::DrawingPhase;
    use crate::interaction::{ConsumerId, ModeId, ModeRequest, PickedFeature, PickedFeatures};

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<MapInteractionModeStack>()
            .init_resource::<DrawingErrorReport>()
            .init_resource::<AppConfig>()
            .add_message::<StartDrawingRequest>()
            .add_message::<FinishDrawingRequest>()
            .add_message::<PickResolved>()
            .add_message::<ModeCancelRequest>()
            .add_message::<DrawingEvent>()
            .add_systems(
                Update,
                (
                    start_drawing,
                    route_cancels,
                    route_picks,
                    finish_drawing,
                    flush_drawing_events,
                )
                    .chain(),
            );
        app
    }

    struct Snapshot {
        owner: ConsumerId,
        mode: Option<ModeId>,
        phase: DrawingPhase,
        point_count: usize,
    }

    fn only_drawing(app: &mut App) -> Snapshot {
        let mut query = app.world_mut().query::<&UserDrawing>();
        let drawing = query.single(app.world()).unwrap();
        Snapshot {
            owner: drawing.consumer(),
            mode: drawing.active_mode(),
            phase: drawing.phase(),
            point_count: drawing.point_count(),
        }
    }

    fn pick_at(x: f32, y: f32) -> PickedFeatures {
        PickedFeatures {
            pick_position: Some(Vec3::new(x, y, 0.0)),
            features: vec![],
        }
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(DrawingTool::all().len(), 2);
        assert_eq!(DrawingTool::Draw.display_name(), "Draw");
        assert_eq!(DrawingTool::Measure.display_name(), "Measure");
    }

    #[test]
    fn test_build_uses_config_options() {
        let config = DrawConfigData {
            message_header: "Sketch".to_string(),
            allow_polygon: false,
            ..Default::default()
        };
        let draw = DrawingTool::Draw.build(&config);
        assert_eq!(draw.options().message_header, "Sketch");
        assert!(!draw.options().allow_polygon);

        let measure = DrawingTool::Measure.build(&config);
        assert_eq!(measure.options().message_header, "Measuring Tool");
        assert!(!measure.options().allow_polygon);
    }

    #[test]
    fn test_start_request_enters_draw_mode() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let state = only_drawing(&mut app);
        assert_eq!(state.phase, DrawingPhase::Drawing);
        assert_eq!(state.point_count, 0);
        assert!(state.mode.is_some());
        assert_eq!(app.world().resource::<MapInteractionModeStack>().len(), 1);
    }

    #[test]
    fn test_duplicate_start_requests_spawn_one_drawing() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let mut query = app.world_mut().query::<&UserDrawing>();
        assert_eq!(query.iter(app.world()).count(), 1);
        assert_eq!(app.world().resource::<MapInteractionModeStack>().len(), 1);
    }

    #[test]
    fn test_resolved_pick_adds_point() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let before = only_drawing(&mut app);
        app.world_mut().write_message(PickResolved {
            mode: before.mode.unwrap(),
            owner: before.owner,
            picked: pick_at(5.0, 5.0),
        });
        app.update();

        let after = only_drawing(&mut app);
        assert_eq!(after.phase, DrawingPhase::Drawing);
        assert_eq!(after.point_count, 1);
        assert_ne!(after.mode, before.mode, "mode is re-armed after a pick");
        assert_eq!(app.world().resource::<MapInteractionModeStack>().len(), 1);
    }

    #[test]
    fn test_cancel_wins_over_pick_in_same_frame() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let before = only_drawing(&mut app);
        let mode = before.mode.unwrap();
        app.world_mut().write_message(PickResolved {
            mode,
            owner: before.owner,
            picked: pick_at(1.0, 1.0),
        });
        app.world_mut().write_message(ModeCancelRequest { mode });
        app.update();

        let after = only_drawing(&mut app);
        assert_eq!(after.phase, DrawingPhase::Idle);
        assert_eq!(after.point_count, 0);
        assert!(after.mode.is_none());
        assert!(app.world().resource::<MapInteractionModeStack>().is_empty());
    }

    #[test]
    fn test_orphaned_mode_is_removed_on_cancel() {
        let mut app = app();
        let mode = app
            .world_mut()
            .resource_mut::<MapInteractionModeStack>()
            .push(ModeRequest {
                owner: ConsumerId(u64::MAX),
                message: Default::default(),
                button_text: "Cancel".to_string(),
            });
        app.world_mut().write_message(ModeCancelRequest { mode });
        app.update();

        assert!(app.world().resource::<MapInteractionModeStack>().is_empty());
    }

    #[test]
    fn test_cancel_reaches_drawing_after_mode_left_stack() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let mode = only_drawing(&mut app).mode.unwrap();
        app.world_mut()
            .resource_mut::<MapInteractionModeStack>()
            .remove(mode);
        app.world_mut().write_message(ModeCancelRequest { mode });
        app.update();

        let after = only_drawing(&mut app);
        assert_eq!(after.phase, DrawingPhase::Idle);
        assert!(after.mode.is_none());
        assert!(app.world().resource::<MapInteractionModeStack>().is_empty());
    }

    #[test]
    fn test_stale_cancel_leaves_current_mode_armed() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        app.update();

        let before = only_drawing(&mut app);
        let first_mode = before.mode.unwrap();
        app.world_mut().write_message(PickResolved {
            mode: first_mode,
            owner: before.owner,
            picked: pick_at(2.0, 2.0),
        });
        app.update();

        app.world_mut()
            .write_message(ModeCancelRequest { mode: first_mode });
        app.update();

        let after = only_drawing(&mut app);
        assert_eq!(after.phase, DrawingPhase::Drawing);
        assert_eq!(after.point_count, 1);
        assert_eq!(app.world().resource::<MapInteractionModeStack>().len(), 1);
    }

    #[test]
    fn test_finish_request_cleans_up() {
        let mut app = app();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Measure,
        });
        app.update();

        let state = only_drawing(&mut app);
        app.world_mut().write_message(PickResolved {
            mode: state.mode.unwrap(),
            owner: state.owner,
            picked: PickedFeatures {
                pick_position: Some(Vec3::ZERO),
                features: vec![PickedFeature::Other("terrain".to_string())],
            },
        });
        app.update();

        app.world_mut().write_message(FinishDrawingRequest {
            tool: DrawingTool::Measure,
        });
        app.update();

        assert_eq!(only_drawing(&mut app).phase, DrawingPhase::Idle);
        assert!(app.world().resource::<MapInteractionModeStack>().is_empty());
    }

    #[test]
    fn test_missing_stack_reports_host_error() {
        let mut app = app();
        app.world_mut().remove_resource::<MapInteractionModeStack>();
        app.world_mut().write_message(StartDrawingRequest {
            tool: DrawingTool::Draw,
        });
        // Only the start system can run without the stack
        app.world_mut().run_system_once(start_drawing).unwrap();

        let report = app.world().resource::<DrawingErrorReport>();
        assert_eq!(
            report.message.as_deref(),
            Some("Interaction mode stack is required for drawing")
        );
        let mut query = app.world_mut().query::<&UserDrawing>();
        assert_eq!(query.iter(app.world()).count(), 0);
    }
}
