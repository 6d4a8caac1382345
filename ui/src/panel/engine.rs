//! State engine for the transcript panel.
//!
//! Holds the rows, visibility, and upload lifecycle of one video's
//! transcripts. The view only renders what this exposes and forwards user
//! and transport events; every transition lives here so it can be tested
//! without a DOM.

use dioxus::logger::tracing::debug;
use serde_json::Value;
use thiserror::Error;

use crate::core::format::{download_url, transcript_client_title, transcript_file_name};
use crate::core::languages::{language_label, sort_by_label, TranscriptSet};
use crate::core::options::PanelOptions;
use crate::core::status::{StatusMessage, UploadStatus};
use crate::core::upload::{validate_transcript_file, SelectedFile, UploadError, UploadRequest};
use crate::t;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no upload was started for this transcript")]
    NoPendingUpload,
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRow {
    /// Stable position of the row for the lifetime of the panel.
    pub slot: usize,
    /// Language the stored transcript is keyed by.
    pub language_code: String,
    /// Current value of the row's language selector.
    pub selected_language: String,
    pub status: Option<UploadStatus>,
    pending: Option<UploadRequest>,
}

impl TranscriptRow {
    fn new(slot: usize, language_code: String) -> Self {
        Self {
            slot,
            selected_language: language_code.clone(),
            language_code,
            status: None,
            pending: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.status, Some(UploadStatus::Uploading))
    }

    pub fn status_message(&self) -> Option<StatusMessage> {
        self.status.as_ref().map(StatusMessage::for_status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptPanelState {
    options: PanelOptions,
    transcripts: TranscriptSet,
    rows: Vec<TranscriptRow>,
    total_transcripts: usize,
    visible: bool,
}

impl TranscriptPanelState {
    pub fn new(options: PanelOptions) -> Self {
        let transcripts = options.transcripts.clone();
        let rows = sort_by_label(&transcripts)
            .into_iter()
            .enumerate()
            .map(|(slot, (_, code))| TranscriptRow::new(slot, code))
            .collect();

        Self {
            total_transcripts: transcripts.len(),
            transcripts,
            rows,
            options,
            visible: false,
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn transcripts(&self) -> &TranscriptSet {
        &self.transcripts
    }

    pub fn rows(&self) -> &[TranscriptRow] {
        &self.rows
    }

    /// Row currently keyed by `language_code`.
    pub fn row(&self, language_code: &str) -> Option<&TranscriptRow> {
        self.rows.iter().find(|r| r.language_code == language_code)
    }

    fn row_mut(&mut self, slot: usize) -> Option<&mut TranscriptRow> {
        self.rows.iter_mut().find(|r| r.slot == slot)
    }

    /// Count shown on the toggle; fixed at construction.
    pub fn transcript_count(&self) -> usize {
        self.total_transcripts
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn toggle_label(&self) -> String {
        let count = self.total_transcripts;
        if self.visible {
            t!("transcripts-toggle-hide", count = count)
        } else {
            t!("transcripts-toggle-show", count = count)
        }
    }

    pub fn toggle_icon_class(&self) -> &'static str {
        if self.visible {
            "fa-caret-down"
        } else {
            "fa-caret-right"
        }
    }

    pub fn client_title(&self) -> String {
        transcript_client_title(
            &self.options.client_video_id,
            &self.options.video_supported_file_formats,
        )
    }

    pub fn row_title(&self, language_code: &str) -> String {
        transcript_file_name(
            &self.client_title(),
            language_code,
            &self.options.video_transcript_settings.transcript_download_file_format,
        )
    }

    pub fn download_url(&self, language_code: &str) -> String {
        download_url(
            &self.options.video_transcript_settings.transcript_download_handler_url,
            &self.options.edx_video_id,
            language_code,
        )
    }

    /// Selector entries as `(label, code)`, sorted by label.
    pub fn language_choices(&self) -> Vec<(String, String)> {
        sort_by_label(&self.options.transcript_available_languages)
    }

    pub fn select_language(&mut self, slot: usize, language_code: String) {
        if let Some(row) = self.row_mut(slot) {
            row.selected_language = language_code;
        }
    }

    /// Captures the upload parameters for a row. `None` means the picker
    /// must not open (unknown row, or an upload already in flight).
    pub fn choose_file(&mut self, slot: usize) -> Option<UploadRequest> {
        let settings = &self.options.video_transcript_settings;
        let url = settings.transcript_upload_handler_url.clone();
        let base_url = settings.handler_base_url.clone();
        let edx_video_id = self.options.edx_video_id.clone();

        let row = self.row_mut(slot)?;
        if row.is_uploading() {
            debug!(slot, "upload already in flight; ignoring");
            return None;
        }

        let request = UploadRequest {
            slot,
            url,
            base_url,
            edx_video_id,
            language_code: row.language_code.clone(),
            new_language_code: row.selected_language.clone(),
            global: false,
        };
        row.pending = Some(request.clone());
        Some(request)
    }

    /// A file was picked for `slot`. On success the returned request must be
    /// submitted; the row already shows the uploading status.
    pub fn transcript_selected(
        &mut self,
        slot: usize,
        file: &SelectedFile,
    ) -> Result<UploadRequest, SelectionError> {
        let row = self.row_mut(slot).ok_or(SelectionError::NoPendingUpload)?;
        let request = row.pending.take().ok_or(SelectionError::NoPendingUpload)?;

        match validate_transcript_file(file) {
            Ok(()) => {
                row.status = Some(UploadStatus::Uploading);
                Ok(request)
            }
            Err(message) => {
                row.status = Some(UploadStatus::Failed(Some(message.clone())));
                Err(SelectionError::Invalid(message))
            }
        }
    }

    pub fn upload_succeeded(
        &mut self,
        request: &UploadRequest,
        response: &Value,
    ) -> Option<StatusMessage> {
        let slot = request.slot;
        debug!(?response, slot, "transcript upload response");
        if self.row_mut(slot).is_none() {
            debug!(slot, "upload finished for a row that is no longer shown");
            return None;
        }
        let new_code = request.new_language_code.clone();

        if request.changes_language() {
            // Idle rows on the new language are superseded; busy ones settle on completion.
            self.rows
                .retain(|r| r.slot == slot || r.language_code != new_code || r.is_uploading());
            if !self.shown_by_other_row(slot, &request.language_code) {
                self.transcripts.remove(&request.language_code);
            }
            let label = language_label(&self.options.transcript_available_languages, &new_code)
                .to_string();
            self.transcripts.insert(new_code.clone(), label);
        }

        let row = self.row_mut(slot)?;
        row.language_code = new_code.clone();
        row.selected_language = new_code;
        row.status = Some(UploadStatus::Uploaded);
        row.status_message()
    }

    pub fn upload_failed(
        &mut self,
        request: &UploadRequest,
        error: &UploadError,
    ) -> Option<StatusMessage> {
        let slot = request.slot;
        let row = self.row_mut(slot)?;
        row.selected_language = request.language_code.clone();
        row.status = Some(UploadStatus::Failed(error.server_message()));
        let message = row.status_message();

        // Another row may have re-keyed onto this language while the upload ran.
        let code = &request.language_code;
        self.rows
            .retain(|r| r.slot == slot || &r.language_code != code || r.is_uploading());
        message
    }

    fn shown_by_other_row(&self, slot: usize, language_code: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.slot != slot && r.language_code == language_code)
    }

    pub fn status_message(&self, slot: usize) -> Option<StatusMessage> {
        self.rows
            .iter()
            .find(|r| r.slot == slot)
            .and_then(TranscriptRow::status_message)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::core::options::TranscriptSettings;
    use crate::i18n;

    const DOWNLOAD_URL: &str = "abc.com/transcript_download/course_id";
    const UPLOAD_URL: &str = "abc.com/transcript_upload/course_id";
    const BASE_URL: &str = "https://studio.example.com/videos/";

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn options(transcripts: &[(&str, &str)]) -> PanelOptions {
        PanelOptions {
            transcripts: map(transcripts),
            edx_video_id: "test-edx-video-id".into(),
            client_video_id: "Video client title name.mp4".into(),
            transcript_available_languages: map(&[
                ("en", "English"),
                ("es", "Spanish"),
                ("cn", "Chinese"),
                ("ar", "Arabic"),
                ("ur", "Urdu"),
            ]),
            video_supported_file_formats: vec![".mov".into(), ".mp4".into()],
            video_transcript_settings: TranscriptSettings {
                transcript_download_file_format: "srt".into(),
                transcript_download_handler_url: DOWNLOAD_URL.into(),
                transcript_upload_handler_url: UPLOAD_URL.into(),
                handler_base_url: Some(BASE_URL.into()),
            },
        }
    }

    fn panel() -> TranscriptPanelState {
        i18n::init();
        TranscriptPanelState::new(options(&[("en", "English"), ("es", "Spanish"), ("ur", "Urdu")]))
    }

    fn file() -> SelectedFile {
        SelectedFile {
            name: "captions.srt".into(),
            bytes: "i".repeat(100).into_bytes(),
        }
    }

    fn slot_of(state: &TranscriptPanelState, code: &str) -> usize {
        state.row(code).expect("row exists").slot
    }

    #[test]
    fn starts_hidden_with_show_label() {
        let state = panel();
        assert!(!state.is_visible());
        assert_eq!(state.toggle_label(), "Show transcripts (3)");
        assert_eq!(state.toggle_icon_class(), "fa-caret-right");
    }

    #[test]
    fn toggling_twice_restores_initial_state() {
        let mut state = panel();
        state.toggle_visibility();
        assert!(state.is_visible());
        assert_eq!(state.toggle_label(), "Hide transcripts (3)");
        assert_eq!(state.toggle_icon_class(), "fa-caret-down");

        state.toggle_visibility();
        assert!(!state.is_visible());
        assert_eq!(state.toggle_label(), "Show transcripts (3)");
        assert_eq!(state.toggle_icon_class(), "fa-caret-right");
    }

    #[test]
    fn rows_follow_label_order() {
        i18n::init();
        let state = TranscriptPanelState::new(options(&[
            ("ur", "Urdu"),
            ("ar", "Arabic"),
            ("es", "Spanish"),
        ]));
        let codes: Vec<_> = state.rows().iter().map(|r| r.language_code.as_str()).collect();
        assert_eq!(codes, ["ar", "es", "ur"]);
    }

    #[test]
    fn empty_set_has_no_rows() {
        i18n::init();
        let state = TranscriptPanelState::new(options(&[]));
        assert!(state.rows().is_empty());
        assert_eq!(state.toggle_label(), "Show transcripts (0)");
    }

    #[test]
    fn row_titles_and_links_use_row_language() {
        let state = panel();
        assert_eq!(state.row_title("en"), "Video client title n_en.srt");
        assert_eq!(
            state.download_url("es"),
            format!("{DOWNLOAD_URL}?edx_video_id=test-edx-video-id&language_code=es")
        );
        let choices: Vec<_> = state.language_choices().into_iter().map(|(_, c)| c).collect();
        assert_eq!(choices, ["ar", "cn", "en", "es", "ur"]);
    }

    #[test]
    fn choose_file_captures_current_and_selected_language() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        state.select_language(slot, "cn".into());

        let request = state.choose_file(slot).expect("row resolves");
        assert_eq!(request.url, UPLOAD_URL);
        assert_eq!(request.base_url.as_deref(), Some(BASE_URL));
        assert_eq!(request.edx_video_id, "test-edx-video-id");
        assert_eq!(request.language_code, "en");
        assert_eq!(request.new_language_code, "cn");
        assert!(!request.global);
    }

    #[test]
    fn choose_file_on_unknown_row_is_a_no_op() {
        let mut state = panel();
        assert!(state.choose_file(99).is_none());
    }

    #[test]
    fn selecting_without_choose_file_is_rejected() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        assert_eq!(
            state.transcript_selected(slot, &file()),
            Err(SelectionError::NoPendingUpload)
        );
        assert!(state.status_message(slot).is_none());
    }

    #[test]
    fn selected_file_is_submitted_and_marked_uploading() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        state.choose_file(slot);

        let request = state.transcript_selected(slot, &file()).expect("accepted");
        assert_eq!(request.language_code, "en");
        let message = state.status_message(slot).expect("status shown");
        assert_eq!(message.message, "Uploading transcript");

        // Second click while in flight does not reopen the picker.
        assert!(state.choose_file(slot).is_none());
    }

    #[test]
    fn success_rekeys_row_and_retitles_it() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        state.select_language(slot, "cn".into());
        state.choose_file(slot);
        let request = state.transcript_selected(slot, &file()).expect("accepted");

        // Still keyed by the old language while in flight.
        assert!(state.row("en").is_some());

        let message = state
            .upload_succeeded(&request, &serde_json::json!({"transcript_url": UPLOAD_URL}))
            .expect("row still present");
        assert_eq!(message.message, "Transcript uploaded.");
        assert_eq!(message.screen_reader_text, "Video transcript upload completed");

        assert!(state.row("en").is_none());
        let row = state.row("cn").expect("row keyed by new language");
        assert_eq!(row.slot, slot);
        assert_eq!(row.selected_language, "cn");
        assert_eq!(state.row_title("cn"), "Video client title n_cn.srt");
        assert!(state.transcripts().contains_key("cn"));
        assert!(!state.transcripts().contains_key("en"));
        assert_eq!(state.transcript_count(), 3);
    }

    #[test]
    fn success_does_not_reorder_rows() {
        let mut state = panel();
        let before: Vec<_> = state.rows().iter().map(|r| r.slot).collect();
        let slot = slot_of(&state, "en");
        state.select_language(slot, "ar".into());
        state.choose_file(slot);
        let request = state.transcript_selected(slot, &file()).expect("accepted");
        state.upload_succeeded(&request, &Value::Null);

        let after: Vec<_> = state.rows().iter().map(|r| r.slot).collect();
        assert_eq!(before, after);
        assert_eq!(state.rows()[0].language_code, "ar");
    }

    #[test]
    fn rekey_onto_existing_language_drops_the_stale_row() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        state.select_language(slot, "ur".into());
        state.choose_file(slot);
        let request = state.transcript_selected(slot, &file()).expect("accepted");
        state.upload_succeeded(&request, &Value::Null);

        assert_eq!(state.rows().len(), 2);
        assert_eq!(state.row("ur").expect("re-keyed row").slot, slot);
        assert_eq!(state.row_title("ur"), "Video client title n_ur.srt");
        assert_eq!(state.transcripts().len(), 2);
        assert_eq!(state.toggle_label(), "Show transcripts (3)");
    }

    /// `ur` starts moving to `ar`, then `en` re-keys onto `ur` before it finishes.
    fn overlapping_rekeys(state: &mut TranscriptPanelState) -> (usize, usize, UploadRequest) {
        let ur = slot_of(state, "ur");
        let en = slot_of(state, "en");

        state.select_language(ur, "ar".into());
        state.choose_file(ur);
        let ur_request = state.transcript_selected(ur, &file()).expect("accepted");

        state.select_language(en, "ur".into());
        state.choose_file(en);
        let en_request = state.transcript_selected(en, &file()).expect("accepted");
        state
            .upload_succeeded(&en_request, &Value::Null)
            .expect("en row re-keyed");
        (ur, en, ur_request)
    }

    fn shown_codes(state: &TranscriptPanelState) -> Vec<String> {
        let mut codes: Vec<_> = state.rows().iter().map(|r| r.language_code.clone()).collect();
        codes.sort();
        codes
    }

    fn stored_codes(state: &TranscriptPanelState) -> Vec<String> {
        state.transcripts().keys().cloned().collect()
    }

    #[test]
    fn rekey_keeps_a_row_with_its_own_upload_in_flight() {
        let mut state = panel();
        let (ur, en, ur_request) = overlapping_rekeys(&mut state);
        assert_eq!(state.rows().len(), 3);
        assert!(state.rows().iter().any(|r| r.slot == ur && r.is_uploading()));

        let message = state
            .upload_succeeded(&ur_request, &Value::Null)
            .expect("in-flight row still shown");
        assert_eq!(message.message, "Transcript uploaded.");

        assert_eq!(shown_codes(&state), ["ar", "es", "ur"]);
        assert_eq!(stored_codes(&state), ["ar", "es", "ur"]);
        assert_eq!(state.row("ur").expect("re-keyed en row").slot, en);
        assert_eq!(state.row("ar").expect("re-keyed ur row").slot, ur);
    }

    #[test]
    fn failed_in_flight_row_absorbs_the_row_that_rekeyed_onto_it() {
        let mut state = panel();
        let (ur, _, ur_request) = overlapping_rekeys(&mut state);

        let message = state
            .upload_failed(&ur_request, &UploadError::Transport("offline".into()))
            .expect("failing row still shown");
        assert_eq!(message.message, "Transcript upload failed.");

        assert_eq!(shown_codes(&state), ["es", "ur"]);
        assert_eq!(stored_codes(&state), ["es", "ur"]);
        assert_eq!(state.row("ur").expect("failed row").slot, ur);
        assert!(state.status_message(ur).is_some());
    }

    #[test]
    fn completion_for_a_missing_row_changes_nothing() {
        let mut state = panel();
        let request = UploadRequest {
            slot: 99,
            url: UPLOAD_URL.into(),
            base_url: None,
            edx_video_id: "test-edx-video-id".into(),
            language_code: "en".into(),
            new_language_code: "ar".into(),
            global: false,
        };
        assert!(state.upload_succeeded(&request, &Value::Null).is_none());
        assert_eq!(stored_codes(&state), ["en", "es", "ur"]);
        assert_eq!(shown_codes(&state), ["en", "es", "ur"]);
    }

    #[test]
    fn failure_restores_selector_and_shows_server_error() {
        let mut state = panel();
        let slot = slot_of(&state, "en");
        state.select_language(slot, "cn".into());
        state.choose_file(slot);
        let request = state.transcript_selected(slot, &file()).expect("accepted");

        let error = UploadError::Rejected {
            status: 400,
            body: r#"{"error": "Invalid transcript file"}"#.into(),
        };
        let message = state.upload_failed(&request, &error).expect("row present");
        assert_eq!(message.message, "Invalid transcript file");
        assert!(message.show_error_icon);

        let row = state.row("en").expect("still keyed by original language");
        assert_eq!(row.selected_language, "en");
        assert!(state.transcripts().contains_key("en"));
        assert!(!state.transcripts().contains_key("cn"));

        // Usable again after a failure.
        assert!(state.choose_file(slot).is_some());
    }

    #[test]
    fn failure_with_malformed_body_uses_default_message() {
        let mut state = panel();
        let slot = slot_of(&state, "es");
        state.choose_file(slot);
        let request = state.transcript_selected(slot, &file()).expect("accepted");

        let error = UploadError::Rejected {
            status: 500,
            body: "<html>Server Error</html>".into(),
        };
        let message = state.upload_failed(&request, &error).expect("row present");
        assert_eq!(message.message, "Transcript upload failed.");

        let error = UploadError::Transport("offline".into());
        let message = state.upload_failed(&request, &error).expect("row present");
        assert_eq!(message.message, "Transcript upload failed.");
        assert_eq!(message.screen_reader_text, "Video transcript upload failed");
    }

    #[test]
    fn uploads_on_different_rows_are_independent() {
        let mut state = panel();
        let en = slot_of(&state, "en");
        let es = slot_of(&state, "es");

        state.choose_file(en);
        state.choose_file(es);
        let en_request = state.transcript_selected(en, &file()).expect("accepted");
        let es_request = state.transcript_selected(es, &file()).expect("accepted");

        state.upload_failed(&es_request, &UploadError::Transport("offline".into()));
        assert!(state.rows().iter().find(|r| r.slot == en).unwrap().is_uploading());

        state.upload_succeeded(&en_request, &Value::Null);
        assert_eq!(
            state.status_message(es).expect("failed status").message,
            "Transcript upload failed."
        );
        assert_eq!(
            state.status_message(en).expect("uploaded status").message,
            "Transcript uploaded."
        );
    }
}
