//! Tag normalization shared by every extractor that compares terms.

/// Canonical comparison form of a tag: lowercased, trimmed, with internal
/// whitespace runs collapsed to a single space.
pub fn normalize_tag(tag: &str) -> String {
    tag.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
