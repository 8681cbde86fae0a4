//! Configuration management for captionset.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section is optional in the TOML file.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure for captionset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// File server endpoint
    pub server: ServerConfig,

    /// Pipeline actor settings
    pub pipeline: PipelineConfig,

    /// Fetch limits
    pub limits: LimitsConfig,

    /// Tag aggregation settings
    pub tagging: TaggingConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.captionset.captionset/config.toml
    /// - Linux: ~/.config/captionset/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\captionset\config\config.toml
    ///
    /// Falls back to ~/.captionset/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "captionset", "captionset")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".captionset").join("config.toml")
            })
    }

    /// Per-caption fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.limits.fetch_timeout_ms)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
