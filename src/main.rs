use bevy::app::PluginGroupBuilder;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use mapdraw::camera::CameraPlugin;
use mapdraw::config::ConfigPlugin;
use mapdraw::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use mapdraw::drawing::{DrawingEvent, UserDrawingPlugin};
use mapdraw::interaction::InteractionPlugin;
use mapdraw::ui::UiPlugin;
use mapdraw::{grid, paths};

/// Set up stdout and file logging for debug builds
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::fs::OpenOptions;
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create logs directory: {}", e);
        return None;
    }

    let logs_dir = paths::logs_dir();
    let log_file_path = logs_dir.join("mapdraw.log");

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(&logs_dir, "mapdraw.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,mapdraw=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Some(guard)
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    None
}

fn log_drawing_events(mut events: MessageReader<DrawingEvent>) {
    for event in events.read() {
        match event {
            DrawingEvent::Started { drawing } => info!("{:?} started", drawing),
            DrawingEvent::PointsChanged {
                drawing,
                point_count,
                closed,
            } => info!(
                "{:?} now has {} points{}",
                drawing,
                point_count,
                if *closed { " (closed)" } else { "" }
            ),
            DrawingEvent::CleanedUp { drawing } => info!("{:?} cleaned up", drawing),
        }
    }
}

/// Bevy's LogPlugin stays on unless our own subscriber is already installed
fn default_plugins(subscriber_installed: bool) -> PluginGroupBuilder {
    let plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Map Draw".into(),
            resolution: (DEFAULT_WINDOW_WIDTH as u32, DEFAULT_WINDOW_HEIGHT as u32).into(),
            ..default()
        }),
        ..default()
    });
    if subscriber_installed {
        plugins.disable::<LogPlugin>()
    } else {
        plugins
    }
}

fn main() {
    // Keep the guard alive for the duration of the program
    let log_guard = setup_logging();

    App::new()
        .add_plugins(default_plugins(log_guard.is_some()))
        .add_plugins(EguiPlugin::default())
        .add_plugins(ConfigPlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(InteractionPlugin)
        .add_plugins(UserDrawingPlugin)
        .add_plugins(UiPlugin)
        .add_systems(Update, (grid::draw_grid, log_drawing_events))
        .run();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_plugin_disabled_with_own_subscriber() {
        assert!(!default_plugins(true).enabled::<LogPlugin>());
    }

    #[test]
    fn test_log_plugin_kept_without_subscriber() {
        assert!(default_plugins(false).enabled::<LogPlugin>());
        assert!(default_plugins(false).enabled::<WindowPlugin>());
    }
}
