//! A single pairing pass: pair, infer, fetch.

use crate::fetch::CaptionLoader;
use crate::pairing::pair_files;
use crate::types::{FetchSummary, ImageRecord};

/// Records produced by one pass, captions included.
#[derive(Debug, Clone, Default)]
pub struct PassOutput {
    pub records: Vec<ImageRecord>,
    pub summary: FetchSummary,
}

/// Run one full pass over a filename listing.
///
/// Never fails: files that cannot be classified are skipped and captions that
/// cannot be read come back empty.
pub async fn run_pass<S: AsRef<str>>(files: &[S], loader: &CaptionLoader) -> PassOutput {
    let start = std::time::Instant::now();

    let records = pair_files(files);
    let (records, summary) = loader.load(records).await;

    tracing::debug!(
        "Pass over {} files produced {} records in {:?}",
        files.len(),
        records.len(),
        start.elapsed()
    );

    PassOutput { records, summary }
}
