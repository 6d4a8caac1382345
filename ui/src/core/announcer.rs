//! Screen-reader announcements.
//!
//! Hosts pass an `announce` handler to the panel; this module provides the
//! browser bridge they usually hand in. On wasm it forwards to
//! `window.SR.readTexts(messages)` when the page exposes that object, and
//! does nothing otherwise.

use dioxus::logger::tracing::debug;

pub fn read_texts(messages: &[String]) {
    debug!(?messages, "screen reader announcement");
    #[cfg(target_arch = "wasm32")]
    browser::read_texts(messages);
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::{JsCast, JsValue};

    pub(super) fn read_texts(messages: &[String]) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(reader) = js_sys::Reflect::get(&window, &JsValue::from_str("SR")) else {
            return;
        };
        if reader.is_undefined() || reader.is_null() {
            return;
        }
        let Ok(read) = js_sys::Reflect::get(&reader, &JsValue::from_str("readTexts")) else {
            return;
        };
        let Ok(read) = read.dyn_into::<js_sys::Function>() else {
            return;
        };
        let texts: js_sys::Array = messages.iter().map(|m| JsValue::from_str(m)).collect();
        let _ = read.call1(&reader, &texts);
    }
}
