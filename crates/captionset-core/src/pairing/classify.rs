//! File name splitting and image classification.

/// Extensions treated as images, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 7] = [".jpg", ".png", ".gif", ".bmp", ".webp", ".jpeg", ".avif"];

/// Part of the name before the first `.`, or the whole name if it has none.
///
/// `archive.tar.gz` has base name `archive`.
pub fn base_name(name: &str) -> &str {
    name.split_once('.').map_or(name, |(base, _)| base)
}

/// Everything after the first `.`.
///
/// `archive.tar.gz` has extension `tar.gz`. Returns `None` when the name has
/// no `.` at all, and `Some("")` when the name ends with its first `.`.
pub fn extension(name: &str) -> Option<&str> {
    name.split_once('.').map(|(_, rest)| rest)
}

/// Check if a file name has an image extension.
pub fn is_image(name: &str) -> bool {
    extension(name)
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            IMAGE_EXTENSIONS
                .iter()
                .any(|fmt| fmt.trim_start_matches('.') == ext_lower)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image() {
        assert!(is_image("test.jpg"));
        assert!(is_image("test.JPG"));
        assert!(is_image("test.jpeg"));
        assert!(is_image("test.PnG"));
        assert!(is_image("test.webp"));
        assert!(is_image("test.avif"));
        assert!(is_image("test.gif"));
        assert!(is_image("test.bmp"));
        assert!(!is_image("test.txt"));
        assert!(!is_image("test.caption"));
        assert!(!is_image("jpg"));
    }

    #[test]
    fn test_name_without_dot_is_not_an_image() {
        assert_eq!(extension("README"), None);
        assert!(!is_image("README"));
        assert_eq!(base_name("README"), "README");
    }

    #[test]
    fn test_trailing_dot_gives_empty_extension() {
        assert_eq!(extension("photo."), Some(""));
        assert!(!is_image("photo."));
    }

    #[test]
    fn test_first_dot_splits_multi_dot_names() {
        assert_eq!(base_name("holiday.2024.jpg"), "holiday");
        assert_eq!(extension("holiday.2024.jpg"), Some("2024.jpg"));
        assert!(!is_image("holiday.2024.jpg"));

        assert_eq!(base_name("dog.jpg.txt"), "dog");
        assert_eq!(extension("dog.jpg.txt"), Some("jpg.txt"));
        assert!(!is_image("dog.jpg.txt"));
    }

    #[test]
    fn test_leading_dot_has_empty_base_name() {
        assert_eq!(base_name(".hidden"), "");
        assert_eq!(extension(".hidden"), Some("hidden"));
    }
}
