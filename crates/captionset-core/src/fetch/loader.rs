//! Concurrent caption loading for a batch of paired records.
//!
//! One tokio task per record, no concurrency cap. A failed or timed-out
//! fetch leaves the caption empty; the batch always completes.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;

use super::source::CaptionSource;
use crate::error::FetchError;
use crate::types::{FetchSummary, ImageRecord};

/// Fills in captions for paired records.
#[derive(Clone)]
pub struct CaptionLoader {
    source: Arc<dyn CaptionSource>,
    timeout: Duration,
}

impl CaptionLoader {
    pub fn new(source: Arc<dyn CaptionSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Fetch the caption of every record whose caption is still empty.
    ///
    /// Returns the records in their input order once every fetch has either
    /// succeeded or fallen back to an empty caption.
    pub async fn load(&self, records: Vec<ImageRecord>) -> (Vec<ImageRecord>, FetchSummary) {
        let tasks: Vec<_> = records
            .iter()
            .map(|record| {
                let pending = record
                    .caption
                    .is_empty()
                    .then(|| (self.source.clone(), record.caption_file.clone()));
                let timeout = self.timeout;
                tokio::spawn(async move {
                    match pending {
                        Some((source, file)) => Some(fetch_caption(&*source, &file, timeout).await),
                        None => None,
                    }
                })
            })
            .collect();

        let outcomes = join_all(tasks).await;

        let mut summary = FetchSummary::default();
        let mut loaded = Vec::with_capacity(records.len());

        for (mut record, outcome) in records.into_iter().zip(outcomes) {
            let result = match outcome {
                Ok(None) => {
                    loaded.push(record);
                    continue;
                }
                Ok(Some(result)) => result,
                Err(e) => {
                    tracing::error!("Caption fetch task for {} panicked: {e}", record.caption_file);
                    Err(FetchError::Transport {
                        file: record.caption_file.clone(),
                        message: e.to_string(),
                    })
                }
            };
            match result {
                Ok(text) => {
                    summary.fetched += 1;
                    record.caption = text;
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!("No caption for {}: {e}", record.image);
                    record.caption = String::new();
                }
            }
            loaded.push(record);
        }

        tracing::debug!(
            "Loaded captions via {}: {} fetched, {} empty",
            self.source.name(),
            summary.fetched,
            summary.failed
        );

        (loaded, summary)
    }
}

/// Read one caption file, bounded by `timeout`.
async fn fetch_caption(
    source: &dyn CaptionSource,
    file: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    match tokio::time::timeout(timeout, source.read_text(file)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            file: file.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
