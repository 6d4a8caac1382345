use dioxus::html::FileEngine;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

use crate::core::format::dom_id_fragment;
use crate::core::options::PanelOptions;
use crate::core::status::StatusMessage;
use crate::core::transport;
use crate::core::upload::{SelectedFile, FILE_FIELD};
use crate::i18n;
use crate::t;

use super::engine::{SelectionError, TranscriptPanelState, TranscriptRow};

/// Collapsible list of a video's transcripts with per-language download and
/// upload controls.
///
/// `announce` receives screen-reader phrases after every status change; when
/// absent the phrases are dropped.
#[component]
pub fn TranscriptPanel(
    options: PanelOptions,
    announce: Option<EventHandler<Vec<String>>>,
) -> Element {
    i18n::init();

    let state = use_signal(|| TranscriptPanelState::new(options.clone()));
    panel_body(state, announce)
}

/// Renders a panel around an existing state signal.
pub fn panel_body(
    state: Signal<TranscriptPanelState>,
    announce: Option<EventHandler<Vec<String>>>,
) -> Element {
    let snapshot = state();

    let wrapper_class = if snapshot.is_visible() {
        "transcripts-panel__wrapper"
    } else {
        "transcripts-panel__wrapper transcripts-panel__wrapper--hidden"
    };
    let toggle_label = snapshot.toggle_label();
    let toggle_icon = snapshot.toggle_icon_class();
    let choices = snapshot.language_choices();
    let id_prefix = format!(
        "transcript-upload-{}",
        dom_id_fragment(&snapshot.options().edx_video_id)
    );

    let entries: Vec<RowEntry> = snapshot
        .rows()
        .iter()
        .map(|row| RowEntry {
            title: snapshot.row_title(&row.language_code),
            download_url: snapshot.download_url(&row.language_code),
            input_id: format!("{id_prefix}-{}", row.slot),
            message: row.status_message(),
            row: row.clone(),
        })
        .collect();

    let mut toggle_state = state;

    rsx! {
        div { class: "transcripts-panel",
            button {
                r#type: "button",
                class: "transcripts-panel__toggle",
                onclick: move |_| toggle_state.with_mut(|s| s.toggle_visibility()),
                span {
                    class: "transcripts-panel__toggle-icon fa {toggle_icon}",
                    aria_hidden: "true",
                }
                span { class: "transcripts-panel__toggle-text", "{toggle_label}" }
            }

            div { class: "{wrapper_class}",
                if entries.is_empty() {
                    p { class: "transcripts-panel__empty", {t!("transcripts-empty")} }
                } else {
                    for entry in entries.into_iter() {
                        {render_row(entry, choices.clone(), state, announce)}
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct RowEntry {
    row: TranscriptRow,
    title: String,
    download_url: String,
    input_id: String,
    message: Option<StatusMessage>,
}

fn render_row(
    entry: RowEntry,
    choices: Vec<(String, String)>,
    mut state: Signal<TranscriptPanelState>,
    announce: Option<EventHandler<Vec<String>>>,
) -> Element {
    let RowEntry {
        row,
        title,
        download_url,
        input_id,
        message,
    } = entry;

    let slot = row.slot;
    let selected = row.selected_language.clone();
    let uploading = row.is_uploading();
    let picker_id = input_id.clone();

    let announce_message = move |message: Option<StatusMessage>| {
        let Some(message) = message else {
            return;
        };
        match announce {
            Some(handler) => handler.call(vec![message.screen_reader_text]),
            None => debug!(text = %message.screen_reader_text, "no announcer registered"),
        }
    };

    let choose_file = move |_| {
        if state.with_mut(|s| s.choose_file(slot)).is_none() {
            return;
        }
        let _ = document::eval(&open_picker_script(&picker_id));
    };

    let on_file_chosen = move |evt: FormEvent| async move {
        let Some(files) = evt.files() else {
            return;
        };
        let Some(file) = read_first_file(files).await else {
            debug!(slot, "file picker closed without a readable file");
            return;
        };

        let request = match state.with_mut(|s| s.transcript_selected(slot, &file)) {
            Ok(request) => request,
            Err(SelectionError::NoPendingUpload) => {
                debug!(slot, "file chosen without a pending upload");
                return;
            }
            Err(err @ SelectionError::Invalid(_)) => {
                warn!(slot, error = %err, "transcript rejected before upload");
                announce_message(state.with(|s| s.status_message(slot)));
                return;
            }
        };
        announce_message(state.with(|s| s.status_message(slot)));

        let message = match transport::submit(&request, file).await {
            Ok(response) => state.with_mut(|s| s.upload_succeeded(&request, &response)),
            Err(err) => state.with_mut(|s| s.upload_failed(&request, &err)),
        };
        announce_message(message);
    };

    rsx! {
        div {
            key: "{slot}",
            class: "transcripts-panel__row",
            "data-language-code": "{row.language_code}",

            div { class: "transcripts-panel__row-header",
                span { class: "transcripts-panel__title", "{title}" }
                select {
                    class: "transcripts-panel__language-menu",
                    aria_label: t!("transcript-language-label"),
                    value: "{selected}",
                    disabled: uploading,
                    onchange: move |evt: FormEvent| {
                        state.with_mut(|s| s.select_language(slot, evt.value()));
                    },
                    for (label, code) in choices.into_iter() {
                        option {
                            key: "{code}",
                            value: "{code}",
                            selected: code == selected,
                            "{label}"
                        }
                    }
                }
            }

            if let Some(message) = message {
                div { class: "transcripts-panel__message transcript-status {message.css_class()}",
                    span {
                        class: "transcript-status__icon fa {message.icon_classes}",
                        aria_hidden: "true",
                    }
                    span { class: "transcript-status__text", "{message.message}" }
                    if message.show_error_icon {
                        span {
                            class: "transcript-status__info fa fa-info-circle",
                            title: t!("transcript-error-info"),
                        }
                    }
                }
            }

            div { class: "transcripts-panel__actions",
                a {
                    class: "transcripts-panel__download button button--ghost",
                    href: "{download_url}",
                    {t!("transcript-download")}
                }
                button {
                    r#type: "button",
                    class: "transcripts-panel__upload button button--primary",
                    disabled: uploading,
                    onclick: choose_file,
                    {t!("transcript-upload")}
                }
                input {
                    id: "{input_id}",
                    class: "transcripts-panel__upload-input",
                    r#type: "file",
                    name: FILE_FIELD,
                    style: "display:none;",
                    onchange: on_file_chosen,
                }
            }
        }
    }
}

async fn read_first_file(files: std::sync::Arc<dyn FileEngine>) -> Option<SelectedFile> {
    let name = files.files().into_iter().next()?;
    let bytes = files.read_file(&name).await?;
    Some(SelectedFile { name, bytes })
}

/// Clicks the hidden file input, clearing it first so picking the same file
/// again still fires `change`. The input may be gone if the row re-rendered
/// away.
fn open_picker_script(input_id: &str) -> String {
    format!(
        "(function (input) {{ if (input) {{ input.value = ''; input.click(); }} }})\
         (document.getElementById({input_id:?}));"
    )
}
