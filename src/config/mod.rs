use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_MESSAGE_HEADER, DEFAULT_PICK_RADIUS};
use crate::drawing::UserDrawingOptions;

fn default_message_header() -> String {
    DEFAULT_MESSAGE_HEADER.to_string()
}

fn default_true() -> bool {
    true
}

fn default_pick_radius() -> f32 {
    DEFAULT_PICK_RADIUS
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawConfigData {
    /// Heading of the draw tool's prompt dialog
    #[serde(default = "default_message_header")]
    pub message_header: String,

    /// Whether clicking the first point closes the loop into a polygon
    #[serde(default = "default_true")]
    pub allow_polygon: bool,

    /// Hit radius for picking drawn points, in screen pixels
    #[serde(default = "default_pick_radius")]
    pub pick_radius: f32,

    #[serde(default = "default_true")]
    pub grid_visible: bool,
}

impl Default for DrawConfigData {
    fn default() -> Self {
        Self {
            message_header: default_message_header(),
            allow_polygon: true,
            pick_radius: DEFAULT_PICK_RADIUS,
            grid_visible: true,
        }
    }
}

impl DrawConfigData {
    /// Options for a new drawing. Later config changes do not affect it.
    pub fn drawing_options(&self) -> UserDrawingOptions {
        UserDrawingOptions {
            message_header: self.message_header.clone(),
            allow_polygon: self.allow_polygon,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: DrawConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DrawConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to toggle loop closing for drawings started afterwards
#[derive(Message)]
pub struct SetAllowPolygonRequest {
    pub allow: bool,
}

#[derive(Message)]
pub struct SetGridVisibleRequest {
    pub visible: bool,
}

/// Parse config file contents.
/// On failure the defaults are returned together with the reason shown to the user.
fn parse_config(json: &str) -> (DrawConfigData, Option<String>) {
    match serde_json::from_str(json) {
        Ok(data) => (data, None),
        Err(e) => {
            warn!("Failed to parse config file: {}", e);
            (
                DrawConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        }
    }
}

/// Load configuration from disk
fn load_config(config_path: PathBuf) -> (AppConfig, Option<String>) {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => {
                let (data, reason) = parse_config(&json);
                if reason.is_none() {
                    info!("Loaded config from {:?}", config_path);
                }
                (data, reason)
            }
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    DrawConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (DrawConfigData::default(), None)
    };

    (
        AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    )
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (loaded, reset_reason) = load_config(crate::paths::config_file());
    *config = loaded;

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

fn set_allow_polygon_system(
    mut events: MessageReader<SetAllowPolygonRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.allow_polygon == event.allow {
            continue;
        }
        config.data.allow_polygon = event.allow;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Polygon closing {}", if event.allow { "enabled" } else { "disabled" });
    }
}

fn set_grid_visible_system(
    mut events: MessageReader<SetGridVisibleRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.grid_visible == event.visible {
            continue;
        }
        config.data.grid_visible = event.visible;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetAllowPolygonRequest>()
            .add_message::<SetGridVisibleRequest>()
            .add_systems(Startup, load_config_system)
            .add_systems(
                Update,
                (
                    set_allow_polygon_system.run_if(on_message::<SetAllowPolygonRequest>),
                    set_grid_visible_system.run_if(on_message::<SetGridVisibleRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_data_default() {
        let data = DrawConfigData::default();
        assert_eq!(data.message_header, "Draw on Map");
        assert!(data.allow_polygon);
        assert_eq!(data.pick_radius, 10.0);
        assert!(data.grid_visible);
    }

    #[test]
    fn test_config_data_serialization() {
        let data = DrawConfigData {
            message_header: "Sketch".to_string(),
            allow_polygon: false,
            pick_radius: 4.5,
            grid_visible: false,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: DrawConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, data);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (data, reason) = parse_config(r#"{ "allow_polygon": false }"#);
        assert!(reason.is_none());
        assert!(!data.allow_polygon);
        assert_eq!(data.message_header, "Draw on Map");
        assert_eq!(data.pick_radius, 10.0);
        assert!(data.grid_visible);
    }

    #[test]
    fn test_corrupt_config_resets_with_reason() {
        let (data, reason) = parse_config("{ not json");
        assert_eq!(data, DrawConfigData::default());
        assert!(reason.unwrap().starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let (config, reason) = load_config(PathBuf::from("does/not/exist/config.json"));
        assert!(reason.is_none());
        assert!(!config.dirty);
        assert_eq!(config.data, DrawConfigData::default());
    }

    #[test]
    fn test_drawing_options_follow_config() {
        let data = DrawConfigData {
            message_header: "Trace Route".to_string(),
            allow_polygon: false,
            ..Default::default()
        };
        let options = data.drawing_options();
        assert_eq!(options.message_header, "Trace Route");
        assert!(!options.allow_polygon);
    }
}
