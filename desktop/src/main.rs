#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config};
use dioxus::logger::tracing::{error, warn};
use dioxus::prelude::*;

use ui::core::announcer;
use ui::core::options::VideoListConfig;
use ui::views::UploadsPage;

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme (ui/assets/theme/main.css); no separate desktop /assets needed.

const DEMO_CONFIG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/demo/videos.json"
));

#[cfg(feature = "desktop")]
fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Studio transcripts – v{}", env!("CARGO_PKG_VERSION"))),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
}

/// Environment variable naming the Studio instance the handler URLs live on.
const BASE_URL_VAR: &str = "STUDIO_BASE_URL";

/// There is no page address to resolve relative handler URLs against on
/// desktop, so the base comes from the environment unless the config has one.
fn with_studio_base_url(mut config: VideoListConfig) -> VideoListConfig {
    let settings = &mut config.video_transcript_settings;
    if settings.handler_base_url.is_none() {
        settings.handler_base_url = std::env::var(BASE_URL_VAR).ok();
        if settings.handler_base_url.is_none() {
            warn!("{BASE_URL_VAR} is unset; relative upload URLs will fail");
        }
    }
    config
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let config = use_hook(|| {
        VideoListConfig::from_json(DEMO_CONFIG)
            .map(with_studio_base_url)
            .map_err(|err| {
                error!(%err, "demo upload list failed to parse");
                err.to_string()
            })
    });
    // No platform screen reader bridge on desktop; phrases are only logged.
    let announce = EventHandler::new(|messages: Vec<String>| announcer::read_texts(&messages));

    rsx! {
        // Always inline embedded CSS (no external file dependency for desktop builds)
        document::Style { "{MAIN_CSS_INLINE}" }

        match config {
            Ok(config) => rsx! { UploadsPage { config, announce } },
            Err(err) => rsx! {
                p { class: "page uploads__placeholder", "Couldn't load the upload list: {err}" }
            },
        }
    }
}
