//! Construction options handed down by the host list, deserialized from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::languages::{AvailableLanguages, TranscriptSet};

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid transcript options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Endpoint configuration shared by every transcript row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Extension used for generated download names (e.g. `srt`).
    #[serde(alias = "trancript_download_file_format")]
    pub transcript_download_file_format: String,
    pub transcript_download_handler_url: String,
    pub transcript_upload_handler_url: String,
    /// Base the handler URLs are resolved against when they are relative.
    /// Falls back to the page address in the browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_base_url: Option<String>,
}

/// Everything one transcript panel needs. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelOptions {
    pub transcripts: TranscriptSet,
    pub edx_video_id: String,
    pub client_video_id: String,
    pub transcript_available_languages: AvailableLanguages,
    pub video_supported_file_formats: Vec<String>,
    pub video_transcript_settings: TranscriptSettings,
}

impl PanelOptions {
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// One uploaded video as listed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub client_video_id: String,
    pub edx_video_id: String,
    #[serde(default)]
    pub transcripts: TranscriptSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// Host-level configuration for a list of uploaded videos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoListConfig {
    pub videos: Vec<VideoRecord>,
    pub transcript_available_languages: AvailableLanguages,
    pub video_supported_file_formats: Vec<String>,
    pub video_transcript_settings: TranscriptSettings,
    #[serde(default = "transcripts_enabled_by_default")]
    pub is_video_transcript_enabled: bool,
}

fn transcripts_enabled_by_default() -> bool {
    true
}

impl VideoListConfig {
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Panel options for `video`, combining its transcripts with the shared settings.
    pub fn panel_options(&self, video: &VideoRecord) -> PanelOptions {
        PanelOptions {
            transcripts: video.transcripts.clone(),
            edx_video_id: video.edx_video_id.clone(),
            client_video_id: video.client_video_id.clone(),
            transcript_available_languages: self.transcript_available_languages.clone(),
            video_supported_file_formats: self.video_supported_file_formats.clone(),
            video_transcript_settings: self.video_transcript_settings.clone(),
        }
    }

    /// One panel per video, or none when transcripts are switched off.
    pub fn all_panel_options(&self) -> Vec<PanelOptions> {
        if !self.is_video_transcript_enabled {
            return Vec::new();
        }
        self.videos.iter().map(|v| self.panel_options(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL_JSON: &str = r#"{
        "transcripts": {"en": "English", "es": "Spanish"},
        "edx_video_id": "test-edx-video-id",
        "client_video_id": "Video client title name.mp4",
        "transcript_available_languages": {"en": "English", "es": "Spanish", "ur": "Urdu"},
        "video_supported_file_formats": [".mov", ".mp4"],
        "video_transcript_settings": {
            "trancript_download_file_format": "srt",
            "transcript_download_handler_url": "abc.com/transcript_download/course_id",
            "transcript_upload_handler_url": "abc.com/transcript_upload/course_id"
        }
    }"#;

    #[test]
    fn parses_panel_options_with_legacy_format_key() {
        let options = PanelOptions::from_json(PANEL_JSON).expect("valid options");
        assert_eq!(options.transcripts.len(), 2);
        assert_eq!(
            options.video_transcript_settings.transcript_download_file_format,
            "srt"
        );
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = PanelOptions::from_json(r#"{"transcripts": {}}"#).unwrap_err();
        assert!(err.to_string().contains("edx_video_id"));
    }

    #[test]
    fn list_config_builds_one_panel_per_video() {
        let raw = r#"{
            "videos": [
                {"client_video_id": "a.mp4", "edx_video_id": "a", "transcripts": {"en": "English"}},
                {"client_video_id": "b.mov", "edx_video_id": "b"}
            ],
            "transcript_available_languages": {"en": "English"},
            "video_supported_file_formats": [".mp4"],
            "video_transcript_settings": {
                "transcript_download_file_format": "srt",
                "transcript_download_handler_url": "/download",
                "transcript_upload_handler_url": "/upload"
            }
        }"#;
        let config = VideoListConfig::from_json(raw).expect("valid config");
        assert!(config.is_video_transcript_enabled);

        let panels = config.all_panel_options();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].edx_video_id, "a");
        assert!(panels[1].transcripts.is_empty());
        assert_eq!(panels[1].video_transcript_settings.transcript_upload_handler_url, "/upload");
        assert_eq!(panels[1].video_transcript_settings.handler_base_url, None);
    }

    #[test]
    fn bundled_demo_config_parses() {
        let raw = include_str!("../../assets/demo/videos.json");
        let config = VideoListConfig::from_json(raw).expect("demo config is valid");
        assert_eq!(config.all_panel_options().len(), config.videos.len());
    }

    #[test]
    fn disabled_feature_yields_no_panels() {
        let mut config = VideoListConfig {
            videos: vec![VideoRecord {
                client_video_id: "a.mp4".into(),
                edx_video_id: "a".into(),
                transcripts: TranscriptSet::new(),
                created: None,
            }],
            transcript_available_languages: AvailableLanguages::new(),
            video_supported_file_formats: vec![],
            video_transcript_settings: TranscriptSettings {
                transcript_download_file_format: "srt".into(),
                transcript_download_handler_url: "/download".into(),
                transcript_upload_handler_url: "/upload".into(),
                handler_base_url: None,
            },
            is_video_transcript_enabled: false,
        };
        assert!(config.all_panel_options().is_empty());

        config.is_video_transcript_enabled = true;
        assert_eq!(config.all_panel_options().len(), 1);
    }
}
