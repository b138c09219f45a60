//! CLI configuration and persistence.

use globhook_core::{EventCategory, HookOptions, KeyCode};
use globhook_platform::RdevEngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config already exists: {0}")]
    AlreadyExists(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How `listen` prints events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Categories printed by `listen`.
    pub categories: Vec<EventCategory>,
    pub format: OutputFormat,
    /// Pressing this key ends `listen`.
    pub stop_key: KeyCode,
    pub hook: HookOptions,
    pub engine: RdevEngineConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            categories: EventCategory::ALL
                .into_iter()
                .filter(|c| *c != EventCategory::MouseMoved)
                .collect(),
            format: OutputFormat::Text,
            stop_key: KeyCode::ESCAPE,
            hook: HookOptions::default(),
            engine: RdevEngineConfig::default(),
        }
    }
}

/// Get the config directory for globhook.
pub fn get_config_dir() -> PathBuf {
    let base = dirs_next::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("globhook")
}

/// Get the default config file path.
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.json")
}

/// Load the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> ConfigResult<CliConfig> {
    if !path.exists() {
        debug!(?path, "No config file, using defaults");
        return Ok(CliConfig::default());
    }

    let json = fs::read_to_string(path)?;
    let config: CliConfig = serde_json::from_str(&json)?;

    debug!(?path, "Loaded config");
    Ok(config)
}

/// Save `config` to `path`, creating parent directories.
pub fn save_config(path: &Path, config: &CliConfig) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;

    info!(?path, "Saved config");
    Ok(())
}

/// Write the default config unless a file is already there.
pub fn init_config(path: &Path, force: bool) -> ConfigResult<CliConfig> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let config = CliConfig::default();
    save_config(path, &config)?;
    Ok(config)
}
