//! Caption extension inference for images without a caption file.

use super::classify::{base_name, extension};
use super::pairer::PairedFiles;
use crate::ordered::InsertionMap;

/// Extension used when the listing has no non-image files to learn from.
pub const DEFAULT_CAPTION_EXTENSION: &str = "txt";

/// Most common lowercased extension among `others`.
///
/// Ties go to the extension that was seen first. Names without an extension
/// or with an empty one are not counted.
pub fn infer_caption_extension<S: AsRef<str>>(others: &[S]) -> String {
    let mut counts: InsertionMap<(String, usize)> = InsertionMap::default();

    for file in others {
        let Some(ext) = extension(file.as_ref()).filter(|ext| !ext.is_empty()) else {
            continue;
        };
        let ext = ext.to_lowercase();
        counts.get_or_insert_with(&ext, || (ext.clone(), 0)).1 += 1;
    }

    let mut best: Option<&(String, usize)> = None;
    for entry in counts.values() {
        if best.map_or(true, |(_, n)| entry.1 > *n) {
            best = Some(entry);
        }
    }

    best.map(|(ext, _)| ext.clone())
        .unwrap_or_else(|| DEFAULT_CAPTION_EXTENSION.to_string())
}

/// Give every record without a caption file `<base>.<ext>`, where `ext` is
/// inferred once for the whole listing.
///
/// Returns the extension that was chosen.
pub fn fill_missing_caption_files(paired: &mut PairedFiles) -> String {
    let ext = infer_caption_extension(paired.others());

    for record in paired.records_mut() {
        if !record.has_caption_file() {
            record.caption_file = format!("{}.{}", base_name(&record.image), ext);
            tracing::trace!("Inferred caption file {} for {}", record.caption_file, record.image);
        }
    }

    ext
}
