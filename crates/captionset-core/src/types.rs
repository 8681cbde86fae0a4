//! Core data types produced by a pairing pass.

use serde::{Deserialize, Serialize};

/// An image paired with its caption file and caption text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image file name as it appeared in the input listing
    pub image: String,

    /// Caption text, verbatim from the caption file. Empty when the caption
    /// file is missing or could not be read.
    pub caption: String,

    /// Caption file name, either found next to the image or inferred
    pub caption_file: String,

    /// UI-owned flag. Always false in freshly paired records.
    pub viewed: bool,
}

impl ImageRecord {
    /// Draft record for an image with nothing resolved yet.
    pub fn draft(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            caption: String::new(),
            caption_file: String::new(),
            viewed: false,
        }
    }

    /// Whether a caption file has been assigned.
    pub fn has_caption_file(&self) -> bool {
        !self.caption_file.is_empty()
    }
}

/// Loading state of the record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// No filename list has been supplied yet
    #[default]
    Idle,
    /// A pass is in flight
    Loading,
    /// The most recently started pass has finished
    Ready,
}

/// Outcome counts for the caption fetches of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchSummary {
    /// Captions read successfully
    pub fetched: usize,

    /// Captions that fell back to empty text
    pub failed: usize,
}

impl FetchSummary {
    pub fn total(&self) -> usize {
        self.fetched + self.failed
    }
}
