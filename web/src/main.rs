use dioxus::logger::tracing::error;
use dioxus::prelude::*;

use ui::core::announcer;
use ui::core::options::VideoListConfig;
use ui::views::UploadsPage;

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Upload list served by the demo page until a real host injects its own.
const DEMO_CONFIG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/demo/videos.json"
));

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    let config = use_hook(|| {
        VideoListConfig::from_json(DEMO_CONFIG).map_err(|err| {
            error!(%err, "demo upload list failed to parse");
            err.to_string()
        })
    });
    // Forwards status phrases to the page's screen reader helper, if any.
    let announce = EventHandler::new(|messages: Vec<String>| announcer::read_texts(&messages));

    rsx! {
        document::Style { "{THEME_CSS}" }

        match config {
            Ok(config) => rsx! { UploadsPage { config, announce } },
            Err(err) => rsx! {
                p { class: "page uploads__placeholder", "Couldn't load the upload list: {err}" }
            },
        }
    }
}
