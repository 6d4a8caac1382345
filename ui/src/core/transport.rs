//! Multipart transcript upload over HTTP.

use dioxus::logger::tracing::{debug, error, info};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde_json::Value;

use super::upload::{SelectedFile, UploadError, UploadRequest, FILE_FIELD};

/// Sends `file` with the request's form fields. Resolves to the parsed JSON
/// body on a 2xx response (`Value::Null` when the body is not JSON).
pub async fn submit(request: &UploadRequest, file: SelectedFile) -> Result<Value, UploadError> {
    let base = request.base_url.clone().or_else(page_base_url);
    let url = resolve_url(&request.url, base.as_deref()).map_err(|e| report(request, e))?;

    let mut form = Form::new();
    for (name, value) in request.form_fields() {
        form = form.text(name, value.to_string());
    }
    let size = file.bytes.len();
    form = form.part(FILE_FIELD, Part::bytes(file.bytes).file_name(file.name));

    debug!(
        %url,
        language = %request.language_code,
        new_language = %request.new_language_code,
        size,
        "submitting transcript"
    );

    let response = reqwest::Client::new()
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| report(request, UploadError::Transport(e.to_string())))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| report(request, UploadError::Transport(e.to_string())))?;

    if !status.is_success() {
        return Err(report(
            request,
            UploadError::Rejected {
                status: status.as_u16(),
                body,
            },
        ));
    }

    info!(video = %request.edx_video_id, language = %request.new_language_code, "transcript uploaded");
    Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
}

/// Resolves a handler URL the way a page link would: absolute URLs are kept,
/// anything else is joined onto `base`. Without a base only absolute URLs work.
pub fn resolve_url(raw: &str, base: Option<&str>) -> Result<Url, UploadError> {
    let resolved = match base {
        Some(base) => Url::parse(base).and_then(|base| base.join(raw)),
        None => Url::parse(raw),
    };
    resolved.map_err(|e| UploadError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(target_arch = "wasm32")]
fn page_base_url() -> Option<String> {
    web_sys::window()?.location().href().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_base_url() -> Option<String> {
    None
}

fn report(request: &UploadRequest, err: UploadError) -> UploadError {
    if request.global {
        error!(video = %request.edx_video_id, error = %err, "transcript upload failed");
    } else {
        debug!(video = %request.edx_video_id, error = %err, "transcript upload failed");
    }
    err
}
