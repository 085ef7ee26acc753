//! Shared key rules for the source and archive namespaces.
//!
//! Archive keys are derived by prefix substitution so a source key and its
//! archive counterpart always differ only by that prefix.

use crate::constants::{ARCHIVE_PREFIX, SOURCE_PREFIX};

/// Derive the archive key for a source key.
pub fn archive_key(key: &str) -> String {
    key.replacen(SOURCE_PREFIX, ARCHIVE_PREFIX, 1)
}

/// Extension of a key: the substring after the last `.`, or empty when the
/// key has no `.`. Case-sensitive, no normalization.
pub fn file_extension(key: &str) -> &str {
    match key.rfind('.') {
        Some(idx) => &key[idx + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_key_substitutes_prefix() {
        assert_eq!(archive_key("images/a.jpg"), "images-archive/a.jpg");
        assert_eq!(archive_key("images/2024/a.jpg"), "images-archive/2024/a.jpg");
    }

    #[test]
    fn archive_key_substitutes_first_occurrence_only() {
        assert_eq!(
            archive_key("images/images/a.jpg"),
            "images-archive/images/a.jpg"
        );
    }

    #[test]
    fn extension_is_last_dot_segment() {
        assert_eq!(file_extension("images/a.jpg"), "jpg");
        assert_eq!(file_extension("images/a.backup.jpeg"), "jpeg");
    }

    #[test]
    fn extension_preserves_case() {
        assert_eq!(file_extension("images/a.JPG"), "JPG");
    }

    #[test]
    fn key_without_dot_has_empty_extension() {
        assert_eq!(file_extension("images/noext"), "");
    }
}
