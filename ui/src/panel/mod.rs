pub mod engine;
mod view;

pub use engine::{SelectionError, TranscriptPanelState, TranscriptRow};
pub use view::{panel_body, TranscriptPanel};
