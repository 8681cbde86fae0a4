//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Folder the file server is serving. Opaque to the pipeline; it is only
    /// carried through to snapshots so consumers know what they are looking at.
    pub working_folder: String,
}

/// File server endpoint captions are fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or address of the file server
    pub host: String,

    /// Port of the file server. 0 means "not configured yet".
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 0,
        }
    }
}

impl ServerConfig {
    /// Base URL of the file server, e.g. `http://localhost:8080/`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }

    /// Whether a port has been set.
    pub fn is_configured(&self) -> bool {
        self.port != 0
    }
}

/// Pipeline actor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max commands buffered before senders wait
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

/// Limits that keep a pass from stalling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-caption fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 10_000,
        }
    }
}

/// Tag aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// String captions are split on to produce tags
    pub delimiter: String,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
