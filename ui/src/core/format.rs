//! Formatting helpers for transcript titles and links.

/// Longest client title kept in generated transcript file names.
pub const CLIENT_TITLE_MAX_CHARS: usize = 20;

/// Client title with video extensions removed, truncated for file names.
///
/// Each extension is removed once, wherever it first appears in the title
/// (not only as a suffix).
pub fn transcript_client_title(client_video_id: &str, video_formats: &[String]) -> String {
    let mut title = client_video_id.to_string();
    for format in video_formats.iter().filter(|f| !f.is_empty()) {
        title = title.replacen(format.as_str(), "", 1);
    }
    title.chars().take(CLIENT_TITLE_MAX_CHARS).collect()
}

/// `"{title}_{language}.{extension}"`
pub fn transcript_file_name(client_title: &str, language_code: &str, extension: &str) -> String {
    format!("{client_title}_{language_code}.{extension}")
}

pub fn download_url(handler_url: &str, edx_video_id: &str, language_code: &str) -> String {
    format!("{handler_url}?edx_video_id={edx_video_id}&language_code={language_code}")
}

/// Characters safe for use inside a DOM id.
pub fn dom_id_fragment(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}
