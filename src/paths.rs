//! Where mapdraw keeps its config file and logs.
//!
//! Debug builds and `cargo run` keep everything in the working directory.
//! Release builds use the per-user directories reported by `dirs`, under a
//! `mapdraw` subdirectory.

use std::path::PathBuf;

const APP_DIR: &str = "mapdraw";
const CONFIG_FILE: &str = "config.json";
const LOGS_DIR: &str = "logs";

/// True for `cargo run` and debug builds.
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

fn app_dir(user_base: Option<PathBuf>) -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }
    user_base.map(|base| base.join(APP_DIR))
}

/// Directory of `config.json`. Only Linux separates config from data.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    let base = dirs::config_dir();
    #[cfg(not(target_os = "linux"))]
    let base = dirs::data_dir();

    app_dir(base)
}

pub fn data_dir() -> Option<PathBuf> {
    app_dir(dirs::data_dir())
}

/// Falls back to a relative `config.json` when no user directory is known.
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

pub fn logs_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(LOGS_DIR))
        .unwrap_or_else(|| PathBuf::from(LOGS_DIR))
}

/// Create the config and log directories before anything writes to them.
pub fn ensure_directories() -> std::io::Result<()> {
    if let Some(config) = config_dir() {
        std::fs::create_dir_all(&config)?;
    }
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_has_json_extension() {
        let path = config_file();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn test_dev_mode_uses_working_directory() {
        // Tests build with debug assertions
        assert!(is_dev_mode());
        assert_eq!(config_dir(), Some(PathBuf::from(".")));
        assert_eq!(data_dir(), Some(PathBuf::from(".")));
        assert_eq!(logs_dir(), PathBuf::from("./logs"));
    }

    #[test]
    fn test_app_dir_ignores_user_base_in_dev_mode() {
        assert_eq!(
            app_dir(Some(PathBuf::from("/home/someone/.config"))),
            Some(PathBuf::from("."))
        );
        assert_eq!(app_dir(None), Some(PathBuf::from(".")));
    }
}
