//! Upload parameters, selected files, and failure decoding.

use serde::Deserialize;
use thiserror::Error;

/// Multipart field name carrying the transcript file.
pub const FILE_FIELD: &str = "transcript-file";

/// Parameters captured when the user clicks Upload on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Row the upload was started from.
    pub slot: usize,
    /// Upload handler as configured; may be relative.
    pub url: String,
    pub base_url: Option<String>,
    pub edx_video_id: String,
    /// Language currently stored for the row (the one being replaced).
    pub language_code: String,
    /// Language the uploaded file is tagged with.
    pub new_language_code: String,
    /// Whether failures should reach the host's global error reporting.
    pub global: bool,
}

impl UploadRequest {
    pub fn form_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("edx_video_id", self.edx_video_id.as_str()),
            ("language_code", self.language_code.as_str()),
            ("new_language_code", self.new_language_code.as_str()),
        ]
    }

    pub fn changes_language(&self) -> bool {
        self.language_code != self.new_language_code
    }
}

/// A file picked from the row's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Hook for client-side checks before a transcript is sent. Accepts everything.
pub fn validate_transcript_file(_file: &SelectedFile) -> Result<(), String> {
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("transcript upload could not be sent: {0}")]
    Transport(String),
    #[error("transcript upload rejected: status={status} body={body}")]
    Rejected { status: u16, body: String },
    #[error("upload URL `{url}` cannot be resolved: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl UploadError {
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Transport(_) | Self::InvalidUrl { .. } => None,
            Self::Rejected { body, .. } => Some(body.as_str()),
        }
    }

    /// Server-provided `error` string, if the body carries a usable one.
    pub fn server_message(&self) -> Option<String> {
        self.response_body().and_then(parse_error_message)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Extracts the `error` field of a JSON failure body; `None` for anything unusable.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .map(|msg| msg.trim().to_string())
        .filter(|msg| !msg.is_empty())
}
