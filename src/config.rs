use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::version::error::VersionError;
use crate::version::minimal::{
    DEFAULT_MINOR_OFFSET, LOWEST_HOSTED_CP_SUPPORT, MinimalVersionPolicy,
};

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when neither the config file nor RUST_LOG sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

const APP_NAME: &str = "version-range";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid machine pool policy: {0}")]
    Policy(#[from] VersionError),
}

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub machine_pool: MachinePoolConfig,
    pub log: LogConfig,
}

/// Machine pool version policy
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MachinePoolConfig {
    /// How many minor versions a machine pool may lag behind its control plane
    pub minor_offset: u64,
    /// Lowest version supporting hosted control planes
    pub lowest_supported: String,
}

impl Default for MachinePoolConfig {
    fn default() -> Self {
        Self {
            minor_offset: DEFAULT_MINOR_OFFSET,
            lowest_supported: LOWEST_HOSTED_CP_SUPPORT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// Write logs to the data directory instead of stderr
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
            file: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Build the minimal version policy described by this configuration.
    pub fn minimal_policy(&self) -> Result<MinimalVersionPolicy, ConfigError> {
        Ok(MinimalVersionPolicy::new(
            self.machine_pool.minor_offset,
            &self.machine_pool.lowest_supported,
        )?)
    }
}

/// Returns the path to the data directory for version-range.
/// Uses $XDG_DATA_HOME/version-range if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-range,
/// or ./version-range if neither is available.
pub fn data_dir() -> PathBuf {
    xdg_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the default config file.
/// Uses $XDG_CONFIG_HOME/version-range/config.json if XDG_CONFIG_HOME is set,
/// otherwise ~/.config/version-range/config.json.
pub fn config_path() -> PathBuf {
    xdg_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
    .join("config.json")
}

fn xdg_dir_with_env(
    xdg_home: Option<String>,
    home_dir: Option<PathBuf>,
    home_fallback: &str,
) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
