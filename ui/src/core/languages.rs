//! Language code ↔ label mappings attached to a video.

use std::collections::BTreeMap;

/// Transcripts currently attached to one video: language code → language name.
pub type TranscriptSet = BTreeMap<String, String>;

/// Every language a transcript may be tagged with: code → display name.
pub type AvailableLanguages = BTreeMap<String, String>;

/// `(label, code)` pairs sorted by label, ties broken by code.
pub fn sort_by_label(languages: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut sorted: Vec<(String, String)> = languages
        .iter()
        .map(|(code, label)| (label.clone(), code.clone()))
        .collect();
    sorted.sort();
    sorted
}

/// Display name for `code`, falling back to the code itself.
pub fn language_label<'a>(languages: &'a AvailableLanguages, code: &'a str) -> &'a str {
    languages.get(code).map(String::as_str).unwrap_or(code)
}
