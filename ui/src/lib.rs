//! Shared UI crate for the studio transcript tools. The transcript panel, its
//! state engine, and the domain helpers live here; platform crates only launch.

pub mod core;
pub mod i18n;
pub mod panel;
pub mod views;

pub use panel::TranscriptPanel;

