//! Error types for the captionset pipeline.
//!
//! Errors are organized by concern. Only configuration errors ever reach the
//! caller as failures of a whole operation; fetch errors are absorbed by the
//! caption loader and surface as empty captions plus a log line.

use thiserror::Error;

/// Top-level error type for captionset operations.
#[derive(Error, Debug)]
pub enum CaptionsetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Caption fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Pipeline actor errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures while reading a caption file from the file server.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Request for {file} failed: {message}")]
    Transport { file: String, message: String },

    /// Server answered with a non-2xx status
    #[error("Server returned HTTP {status} for {file}")]
    Status { file: String, status: u16 },

    /// Body was not valid UTF-8
    #[error("Response for {file} is not text")]
    NotText { file: String },

    /// The request did not finish in time
    #[error("Fetching {file} timed out after {timeout_ms}ms")]
    Timeout { file: String, timeout_ms: u64 },

    /// The endpoint plus file name could not form a URL
    #[error("Cannot build URL for {file}: {message}")]
    InvalidUrl { file: String, message: String },
}

impl FetchError {
    /// Name of the caption file the failed request was for.
    pub fn file(&self) -> &str {
        match self {
            Self::Transport { file, .. }
            | Self::Status { file, .. }
            | Self::NotText { file }
            | Self::Timeout { file, .. }
            | Self::InvalidUrl { file, .. } => file,
        }
    }
}

/// Errors talking to the pipeline actor.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The actor task has stopped and no longer accepts commands
    #[error("Caption pipeline is closed")]
    Closed,
}

/// Convenience type alias for captionset results.
pub type Result<T> = std::result::Result<T, CaptionsetError>;

/// Convenience type alias for fetch results.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_file_accessor() {
        let err = FetchError::Status {
            file: "dog.txt".to_string(),
            status: 404,
        };
        assert_eq!(err.file(), "dog.txt");
        assert_eq!(err.to_string(), "Server returned HTTP 404 for dog.txt");
    }

    #[test]
    fn test_config_error_converts_to_top_level() {
        let err: CaptionsetError = ConfigError::ValidationError("bad".into()).into();
        assert!(err.to_string().contains("Invalid configuration: bad"));
    }
}
