//! In-memory results container.
//!
//! Holds exactly what a page would show: a visibility flag and the current rows.
//! Links are addressable by their element id.

use serde::Serialize;

use crate::presenter::{Presenter, ResultLink, ResultRow, DEFAULT_CONTAINER_ID};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// A results container that keeps its state in memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultContainer {
    id: String,
    visibility: Visibility,
    rows: Vec<ResultRow>,
}

impl Default for ResultContainer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_ID)
    }
}

impl ResultContainer {
    /// A hidden, empty container named `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            visibility: Visibility::Hidden,
            rows: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Shown
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rendered links in row order, placeholders skipped
    pub fn links(&self) -> impl Iterator<Item = &ResultLink> {
        self.rows.iter().filter_map(ResultRow::as_link)
    }

    /// Look a rendered link up by its element id
    pub fn link_by_id(&self, id: &str) -> Option<&ResultLink> {
        self.links().find(|link| link.id == id)
    }
}

impl Presenter for ResultContainer {
    fn clear(&mut self) {
        self.rows.clear();
    }

    fn show(&mut self, rows: Vec<ResultRow>) {
        self.rows = rows;
        self.visibility = Visibility::Shown;
    }

    fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }
}
