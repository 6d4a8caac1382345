//! Domain types and pure helpers shared by the transcript panel and its hosts.

pub mod announcer;
pub mod format;
pub mod languages;
pub mod options;
pub mod status;
pub mod transport;
pub mod upload;
