//! Rendering surface for search results.
//!
//! [`SearchWidget`](crate::widget::SearchWidget) decides *what* the container shows;
//! a [`Presenter`] decides *how*. Implementations here: the in-memory
//! [`ResultContainer`](crate::container::ResultContainer) and the markup-producing
//! [`HtmlTable`](crate::html::HtmlTable). Tests can supply their own.

use serde::{Deserialize, Serialize};

use crate::index::Entry;

/// Text of the single row shown when a query matches nothing
pub const NO_RESULTS: &str = "No results";

/// Prefix of the sequential element id given to each rendered link
pub const LINK_ID_PREFIX: &str = "link";

/// Default external name of the results container
pub const DEFAULT_CONTAINER_ID: &str = "results";

/// One clickable result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLink {
    /// Addressable element id, `link0`, `link1`, ...
    pub id: String,
    /// Display text (the qualified name)
    pub text: String,
    /// Link destination
    pub href: String,
}

impl ResultLink {
    /// Build the link for the `position`-th match (0-based)
    pub fn for_entry(position: usize, entry: &Entry) -> Self {
        Self {
            id: link_id(position),
            text: entry.qualified_name.clone(),
            href: entry.url.clone(),
        }
    }
}

/// A row of the results container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultRow {
    Link(ResultLink),
    /// Plain text, no link
    Placeholder { text: String },
}

impl ResultRow {
    pub fn no_results() -> Self {
        ResultRow::Placeholder {
            text: NO_RESULTS.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ResultRow::Link(link) => &link.text,
            ResultRow::Placeholder { text } => text,
        }
    }

    pub fn as_link(&self) -> Option<&ResultLink> {
        match self {
            ResultRow::Link(link) => Some(link),
            ResultRow::Placeholder { .. } => None,
        }
    }
}

/// Element id for the `position`-th rendered link
pub fn link_id(position: usize) -> String {
    format!("{LINK_ID_PREFIX}{position}")
}

/// Rows for a match result: one link per entry, or the placeholder when empty
pub fn rows_for_matches(matches: &[&Entry]) -> Vec<ResultRow> {
    if matches.is_empty() {
        return vec![ResultRow::no_results()];
    }

    matches
        .iter()
        .enumerate()
        .map(|(position, entry)| ResultRow::Link(ResultLink::for_entry(position, entry)))
        .collect()
}

/// The container the widget owns.
///
/// Calls always arrive as `clear()` followed by at most one of `show` / `hide`.
/// `clear()` on an empty container must be a no-op.
pub trait Presenter {
    /// Remove every rendered row
    fn clear(&mut self);

    /// Make the container visible with `rows` as its content
    fn show(&mut self, rows: Vec<ResultRow>);

    /// Make the container invisible
    fn hide(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn show(&mut self, rows: Vec<ResultRow>) {
        (**self).show(rows);
    }

    fn hide(&mut self) {
        (**self).hide();
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn show(&mut self, rows: Vec<ResultRow>) {
        (**self).show(rows);
    }

    fn hide(&mut self) {
        (**self).hide();
    }
}
