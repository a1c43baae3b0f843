//! Query matching against the symbol index.
//!
//! The query text is a regular expression. `read_png.*mem` and `^imageformats\.bmp`
//! are both valid searches; an unbalanced `(` is an error that goes back to the
//! caller untouched. Matching is unanchored and case-insensitive, and results keep
//! index order. There is no scoring.
//!
//! Pattern compilation lives in [`compile_pattern`] alone so the query language can
//! change (see [`MatchMode::Literal`]) without the presenter noticing.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DocsearchError, Result};
use crate::index::{Entry, SymbolIndex};

/// How raw query text is turned into a pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Query is compiled as a regular expression, special characters included
    #[default]
    Regex,
    /// Query is matched as plain text
    Literal,
}

/// Compile a query into a case-insensitive pattern.
///
/// An empty query compiles to a pattern that matches every name.
pub fn compile_pattern(query: &str, mode: MatchMode, size_limit: Option<usize>) -> Result<Regex> {
    let source = match mode {
        MatchMode::Regex => query.to_string(),
        MatchMode::Literal => regex::escape(query),
    };

    let mut builder = RegexBuilder::new(&source);
    builder.case_insensitive(true);
    if let Some(limit) = size_limit {
        builder.size_limit(limit);
    }

    builder.build().map_err(|err| {
        warn!(query, error = %err, "query is not a valid pattern");
        DocsearchError::invalid_pattern(query, err)
    })
}

/// Filters a [`SymbolIndex`] by query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    mode: MatchMode,
    size_limit: Option<usize>,
}

impl Matcher {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            size_limit: None,
        }
    }

    /// Cap the compiled size of query patterns
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn compile(&self, query: &str) -> Result<Regex> {
        compile_pattern(query, self.mode, self.size_limit)
    }

    /// Every entry whose lowercased name contains a match, in index order
    pub fn find<'a>(&self, index: &'a SymbolIndex, query: &str) -> Result<Vec<&'a Entry>> {
        let pattern = self.compile(query)?;
        Ok(filter_index(index, &pattern))
    }
}

/// Match `query` as a regular expression against `index`
pub fn match_entries<'a>(index: &'a SymbolIndex, query: &str) -> Result<Vec<&'a Entry>> {
    Matcher::default().find(index, query)
}

/// Apply an already-compiled pattern to every entry in order
///
/// Full lowercasing and the pattern's simple case folding disagree on a few
/// characters (`İ` lowercases to two code points), so the unfolded name is
/// tried as well.
pub fn filter_index<'a>(index: &'a SymbolIndex, pattern: &Regex) -> Vec<&'a Entry> {
    let matches: Vec<&Entry> = index
        .iter_folded()
        .filter(|(entry, folded)| {
            pattern.is_match(folded) || pattern.is_match(&entry.qualified_name)
        })
        .map(|(entry, _)| entry)
        .collect();

    debug!(
        pattern = pattern.as_str(),
        matched = matches.len(),
        total = index.len(),
        "filtered symbol index"
    );
    matches
}
