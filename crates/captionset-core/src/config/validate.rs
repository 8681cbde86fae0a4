//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host must not be empty".into(),
            ));
        }
        if self.pipeline.buffer_size == 0 {
            return Err(ConfigError::ValidationError(
                "pipeline.buffer_size must be > 0".into(),
            ));
        }
        if self.limits.fetch_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.fetch_timeout_ms must be > 0".into(),
            ));
        }
        if self.tagging.delimiter.is_empty() {
            return Err(ConfigError::ValidationError(
                "tagging.delimiter must not be empty".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "json" | "jsonl") {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be \"json\" or \"jsonl\", got \"{}\"",
                self.output.format
            )));
        }
        Ok(())
    }
}
