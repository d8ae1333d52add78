//! Configuration file management for StudyMate.
//!
//! Supports reading client settings from `~/.config/studymate/config.json`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use studymate_core::language::Language;

/// Root configuration structure for config.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the StudyMate backend.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Preferred explanation language for new sessions.
    #[serde(default)]
    pub language: Option<Language>,
}

/// Loads the configuration file from ~/.config/studymate/config.json
pub fn load_api_config() -> Result<ApiConfig, String> {
    let config_path = get_config_path()?;
    load_api_config_from(&config_path)
}

/// Loads a configuration file from an explicit path.
pub fn load_api_config_from(config_path: &Path) -> Result<ApiConfig, String> {
    if !config_path.exists() {
        return Err(format!(
            "Configuration file not found at: {}",
            config_path.display()
        ));
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    serde_json::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}

/// Returns the path to the configuration file: ~/.config/studymate/config.json
fn get_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home.join(".config").join("studymate").join("config.json"))
}
