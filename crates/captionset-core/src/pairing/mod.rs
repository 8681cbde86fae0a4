//! Pairing images with caption files.
//!
//! - **classify**: base name / extension splitting and the image allow-list
//! - **pairer**: groups a listing into records by base name
//! - **infer**: picks a caption extension for images left without one

pub mod classify;
pub mod infer;
pub mod pairer;

pub use classify::{base_name, extension, is_image, IMAGE_EXTENSIONS};
pub use infer::{fill_missing_caption_files, infer_caption_extension, DEFAULT_CAPTION_EXTENSION};
pub use pairer::PairedFiles;

use crate::types::ImageRecord;

/// Pair a listing and resolve every record's caption file.
///
/// Captions are left empty; the caption loader fills them in.
pub fn pair_files<S: AsRef<str>>(files: &[S]) -> Vec<ImageRecord> {
    let mut paired = PairedFiles::pair(files);
    let matched = paired.records().len() - paired.unresolved();
    let ext = fill_missing_caption_files(&mut paired);

    tracing::debug!(
        "Paired {} files into {} images ({} matched, {} inferred as .{})",
        files.len(),
        paired.records().len(),
        matched,
        paired.records().len() - matched,
        ext
    );

    paired.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_files_resolves_every_caption_file() {
        let records = pair_files(&["dog.jpg", "dog.txt", "cat.png"]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].image, "dog.jpg");
        assert_eq!(records[0].caption_file, "dog.txt");
        assert_eq!(records[1].image, "cat.png");
        assert_eq!(records[1].caption_file, "cat.txt");
        assert!(records.iter().all(|r| r.caption.is_empty() && !r.viewed));
    }

    #[test]
    fn test_pair_files_is_idempotent() {
        let files = ["b.png", "a.jpg", "a.srt", "b.png", "c.webp", "c.txt", "d"];
        assert_eq!(pair_files(&files), pair_files(&files));
    }
}
