use dioxus::prelude::*;

use crate::core::options::VideoListConfig;
use crate::panel::TranscriptPanel;
use crate::{i18n, t};

/// Minimal host list: one row per uploaded video, each embedding its own
/// transcript panel when the transcript feature is enabled.
#[component]
pub fn UploadsPage(
    config: VideoListConfig,
    announce: Option<EventHandler<Vec<String>>>,
) -> Element {
    i18n::init();
    let show_transcripts = config.is_video_transcript_enabled;

    rsx! {
        section { class: "page page-uploads",
            h1 { {t!("uploads-title")} }

            if config.videos.is_empty() {
                p { class: "uploads__placeholder", {t!("uploads-empty")} }
            } else {
                table { class: "uploads__table",
                    thead { class: "js-table-head",
                        tr {
                            th { class: "video-head-col name-col", {t!("uploads-column-name")} }
                            th { class: "video-head-col id-col", {t!("uploads-column-video-id")} }
                            if show_transcripts {
                                th { class: "video-head-col transcripts-col", {t!("uploads-column-transcripts")} }
                            }
                        }
                    }
                    tbody { class: "js-table-body",
                        for video in config.videos.iter() {
                            tr { key: "{video.edx_video_id}",
                                td { class: "name-col", "{video.client_video_id}" }
                                td { class: "id-col", "{video.edx_video_id}" }
                                if show_transcripts {
                                    td { class: "transcripts-col",
                                        if let Some(handler) = announce {
                                            TranscriptPanel {
                                                options: config.panel_options(video),
                                                announce: handler,
                                            }
                                        } else {
                                            TranscriptPanel { options: config.panel_options(video) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
