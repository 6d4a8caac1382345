//! Per-row upload status and its rendered message.

use crate::t;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Uploaded,
    /// Optional server or validation message replacing the default text.
    Failed(Option<String>),
}

/// What a row shows (and announces) for a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub icon_classes: &'static str,
    pub message: String,
    pub screen_reader_text: String,
    pub show_error_icon: bool,
}

impl StatusMessage {
    pub fn for_status(status: &UploadStatus) -> Self {
        match status {
            UploadStatus::Uploading => Self {
                icon_classes: "fa-spinner fa-pulse",
                message: t!("transcript-status-uploading"),
                screen_reader_text: t!("transcript-sr-uploading"),
                show_error_icon: false,
            },
            UploadStatus::Uploaded => Self {
                icon_classes: "fa-check",
                message: t!("transcript-status-uploaded"),
                screen_reader_text: t!("transcript-sr-uploaded"),
                show_error_icon: false,
            },
            UploadStatus::Failed(error) => Self {
                icon_classes: "fa-exclamation-triangle",
                message: error
                    .as_deref()
                    .filter(|e| !e.trim().is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| t!("transcript-status-failed")),
                screen_reader_text: t!("transcript-sr-failed"),
                show_error_icon: true,
            },
        }
    }

    /// Modifier class for the message container.
    pub fn css_class(&self) -> &'static str {
        if self.show_error_icon {
            "transcript-status--error"
        } else {
            "transcript-status--info"
        }
    }
}
