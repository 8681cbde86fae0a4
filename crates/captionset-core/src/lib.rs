//! Captionset Core - pairs images with caption files and aggregates caption tags.
//!
//! Takes a flat listing of file names from one folder, pairs every image with
//! the caption file sharing its base name (inferring a name when none exists),
//! reads the captions from a local file server and counts the tags in them.
//!
//! # Architecture
//!
//! ```text
//! Listing → Pair → Infer caption extension → Fetch captions → Tag stats
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use captionset_core::{Captionset, Config};
//!
//! #[tokio::main]
//! async fn main() -> captionset_core::Result<()> {
//!     let captionset = Captionset::new(Config::load()?);
//!     let pipeline = captionset.http_pipeline()?;
//!
//!     pipeline.set_files(vec!["dog.jpg".into(), "dog.txt".into()]).await?;
//!     let snapshot = pipeline.wait_ready().await?;
//!     println!("Top tags: {:?}", snapshot.tags.sorted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
mod ordered;
pub mod output;
pub mod pairing;
pub mod pipeline;
pub mod tagging;
pub mod types;

use std::sync::Arc;

pub use config::Config;
pub use error::{CaptionsetError, ConfigError, FetchError, FetchResult, PipelineError, Result};
pub use fetch::{CaptionLoader, CaptionSource, HttpCaptionSource};
pub use output::{OutputFormat, PassReport, ReportRecord, ReportWriter};
pub use pairing::{pair_files, PairedFiles};
pub use pipeline::{CaptionPipeline, PassOutput, PipelineSnapshot};
pub use tagging::{TagAggregator, TagFrequencyTable, TagStats, TokenCounter};
pub use types::{FetchSummary, ImageRecord, LoadState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main entry point: builds loaders and pipelines from a configuration.
pub struct Captionset {
    config: Config,
}

impl Captionset {
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing captionset v{}", VERSION);
        Self { config }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Caption source for the configured file server.
    pub fn http_source(&self) -> Result<Arc<dyn CaptionSource>> {
        Ok(Arc::new(HttpCaptionSource::from_config(&self.config.server)?))
    }

    pub fn loader(&self, source: Arc<dyn CaptionSource>) -> CaptionLoader {
        CaptionLoader::new(source, self.config.fetch_timeout())
    }

    /// Start a pipeline actor reading captions from `source`.
    pub fn pipeline(&self, source: Arc<dyn CaptionSource>) -> CaptionPipeline {
        CaptionPipeline::spawn(&self.config, source)
    }

    /// Start a pipeline actor reading captions from the configured file server.
    pub fn http_pipeline(&self) -> Result<CaptionPipeline> {
        Ok(self.pipeline(self.http_source()?))
    }

    /// One-shot pass without an actor: pair, fetch and count tags.
    pub async fn pair(
        &self,
        files: &[String],
        source: Arc<dyn CaptionSource>,
    ) -> (PassOutput, TagStats) {
        let output = pipeline::run_pass(files, &self.loader(source)).await;
        let tags = TagAggregator::new(self.config.tagging.delimiter.clone()).aggregate(&output.records);
        (output, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSource;

    #[async_trait::async_trait]
    impl CaptionSource for EchoSource {
        fn name(&self) -> &str {
            "echo"
        }

        async fn read_text(&self, file: &str) -> FetchResult<String> {
            Ok(format!("{file}, caption"))
        }
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_http_source_from_config() {
        let mut config = Config::default();
        config.server.port = 8080;
        let captionset = Captionset::new(config);
        assert_eq!(captionset.config().server.port, 8080);
        assert_eq!(captionset.http_source().unwrap().name(), "http");
    }

    #[tokio::test]
    async fn test_one_shot_pair() {
        let captionset = Captionset::new(Config::default());
        let files = vec!["a.jpg".to_string(), "b.png".to_string(), "b.srt".to_string()];

        let (output, tags) = captionset.pair(&files, Arc::new(EchoSource)).await;

        assert_eq!(output.records[0].caption_file, "a.srt");
        assert_eq!(output.records[1].caption, "b.srt, caption");
        assert_eq!(tags.frequencies.get("caption"), 2);
        assert_eq!(tags.sorted[0], "caption");
    }
}
