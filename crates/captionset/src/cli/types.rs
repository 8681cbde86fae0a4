//! CLI enum types shared by commands.

use clap::ValueEnum;
use captionset_core::OutputFormat as CoreOutputFormat;

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl OutputFormat {
    /// Resolve the format from the flag, falling back to the config value.
    pub fn resolve(flag: Option<Self>, configured: &str) -> CoreOutputFormat {
        match flag {
            Some(OutputFormat::Json) => CoreOutputFormat::Json,
            Some(OutputFormat::Jsonl) => CoreOutputFormat::JsonLines,
            None => CoreOutputFormat::parse(configured).unwrap_or(CoreOutputFormat::Json),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}
