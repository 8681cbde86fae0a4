//! Groups a flat file listing into image records keyed by base name.

use super::classify::{base_name, is_image};
use crate::ordered::InsertionMap;
use crate::types::ImageRecord;

/// Result of matching images against the non-image files next to them.
///
/// Records keep the position at which their base name first appeared, even
/// when a later image with the same base name replaced the draft.
#[derive(Debug, Clone, Default)]
pub struct PairedFiles {
    records: InsertionMap<ImageRecord>,
    others: Vec<String>,
}

impl PairedFiles {
    /// Partition `files` and assign caption files.
    ///
    /// Images sharing a base name: the last one wins. Non-image files sharing
    /// a base name: the first one becomes the caption file, later ones are
    /// left unused.
    pub fn pair<S: AsRef<str>>(files: &[S]) -> Self {
        let mut paired = Self::default();
        let mut others = Vec::new();

        for file in files {
            let file = file.as_ref();
            if is_image(file) {
                paired.records.insert(base_name(file), ImageRecord::draft(file));
            } else {
                others.push(file.to_string());
            }
        }

        for file in &others {
            if let Some(record) = paired.records.get_mut(base_name(file)) {
                if !record.has_caption_file() {
                    record.caption_file = file.clone();
                }
            }
        }

        paired.others = others;
        paired
    }

    /// Record for a base name, if an image with that base name exists.
    pub fn get(&self, base: &str) -> Option<&ImageRecord> {
        self.records.get(base)
    }

    /// All records in first-appearance order.
    pub fn records(&self) -> &[ImageRecord] {
        self.records.values()
    }

    /// Every non-image file, in listing order, whether or not it was paired.
    pub fn others(&self) -> &[String] {
        &self.others
    }

    /// Records still waiting for a caption file.
    pub fn unresolved(&self) -> usize {
        self.records().iter().filter(|r| !r.has_caption_file()).count()
    }

    pub(crate) fn records_mut(&mut self) -> &mut [ImageRecord] {
        self.records.values_mut()
    }

    pub fn into_records(self) -> Vec<ImageRecord> {
        self.records.into_values()
    }
}
