//! Interactive search - the results container hosted in a terminal
//!
//! The search box drives the same widget a documentation page embeds:
//! - Typing re-runs the query on every key release
//! - Escape hides the results and keeps the query
//! - Up/Down move through the links, Enter prints the chosen link's href

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use terminal::run;
