//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::error::{IgnoroError, Result};

/// Default settings file: `~/.config/ignoro/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("ignoro")
            .join("config.yml")
    })
}

/// Load settings.
///
/// With an explicit path the file must exist. Without one, the default
/// location is tried and silently skipped when absent.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => load_settings_file(path),
        None => match default_config_path() {
            Some(path) if path.exists() => load_settings_file(&path),
            _ => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Settings::default())
            }
        },
    }
}

/// Parse a single settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| IgnoroError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let settings = parse_settings(&content).map_err(|message| IgnoroError::Config {
        path: path.to_path_buf(),
        message,
    })?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse settings from YAML text. Blank input yields defaults.
pub fn parse_settings(content: &str) -> std::result::Result<Settings, String> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}
