//! Immutable views of the pipeline state handed to consumers.

use serde::Serialize;

use crate::tagging::TagStats;
use crate::types::{FetchSummary, ImageRecord, LoadState};

/// Everything a consumer needs to render the current record set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSnapshot {
    /// Pass that produced `records`; 0 before the first pass completes
    pub generation: u64,

    /// Loading state of the most recently started pass
    pub state: LoadState,

    /// Opaque folder identifier supplied by the caller
    pub working_folder: String,

    /// Paired records of the last completed pass
    pub records: Vec<ImageRecord>,

    /// Index of the record selected by the caller
    pub active: Option<usize>,

    /// Tag statistics over `records`
    pub tags: TagStats,

    /// CLIP token count of each record's caption, same order as `records`
    pub token_counts: Vec<usize>,

    /// Fetch outcome counts of the last completed pass
    pub summary: FetchSummary,
}

impl PipelineSnapshot {
    /// The selected record, if any.
    pub fn active_record(&self) -> Option<&ImageRecord> {
        self.active.and_then(|i| self.records.get(i))
    }

    /// Token count of the record at `index`.
    pub fn tokens(&self, index: usize) -> Option<usize> {
        self.token_counts.get(index).copied()
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }
}
