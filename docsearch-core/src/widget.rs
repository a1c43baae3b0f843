//! The search widget: result presenter and dismiss handler.
//!
//! Two entry points, meant for two different event classes on the host page:
//!
//! - [`SearchWidget::update`] for input-change / key-up on the search box
//! - [`SearchWidget::dismiss`] for a (usually page-wide) key-down listener
//!
//! Every call starts from scratch. The container is cleared first and then
//! either hidden or filled with the current matches, so a later keystroke
//! simply replaces whatever an earlier one rendered.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::index::SymbolIndex;
use crate::matcher::{filter_index, Matcher};
use crate::presenter::{rows_for_matches, Presenter};

/// DOM-style numeric key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// The cancel key
    pub const ESCAPE: KeyCode = KeyCode(27);

    pub fn is_escape(self) -> bool {
        self == Self::ESCAPE
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        KeyCode(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns the symbol index, the matcher and the results container
pub struct SearchWidget<P> {
    index: SymbolIndex,
    matcher: Matcher,
    presenter: P,
}

impl<P: Presenter> SearchWidget<P> {
    pub fn new(index: SymbolIndex, presenter: P) -> Self {
        Self::with_matcher(index, Matcher::default(), presenter)
    }

    pub fn with_matcher(index: SymbolIndex, matcher: Matcher, presenter: P) -> Self {
        Self {
            index,
            matcher,
            presenter,
        }
    }

    /// Re-render the container for `query`.
    ///
    /// An empty query or the escape key hides the container without matching.
    /// Otherwise the container is shown with one link per match, or a single
    /// "No results" row.
    ///
    /// # Errors
    ///
    /// [`DocsearchError::InvalidPattern`](crate::DocsearchError::InvalidPattern)
    /// when `query` does not compile. The container is then left cleared and
    /// hidden.
    #[instrument(skip_all, fields(query = %query, key = ?key))]
    pub fn update(&mut self, query: &str, key: Option<KeyCode>) -> Result<()> {
        self.presenter.clear();

        if query.is_empty() || key.is_some_and(KeyCode::is_escape) {
            debug!("hiding results");
            self.presenter.hide();
            return Ok(());
        }

        let pattern = match self.matcher.compile(query) {
            Ok(pattern) => pattern,
            Err(err) => {
                self.presenter.hide();
                return Err(err);
            }
        };

        let matches = filter_index(&self.index, &pattern);
        let rows = rows_for_matches(&matches);
        debug!(rows = rows.len(), "showing results");
        self.presenter.show(rows);
        Ok(())
    }

    /// Clear and hide the container on escape, ignore any other key
    #[instrument(skip_all, fields(key = %key))]
    pub fn dismiss(&mut self, key: KeyCode) {
        if !key.is_escape() {
            return;
        }

        debug!("dismissing results");
        self.presenter.clear();
        self.presenter.hide();
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Entry;
    use crate::presenter::ResultRow;

    /// Records every presenter call in order
    #[derive(Debug, Default)]
    struct CallLog {
        calls: Vec<String>,
    }

    impl Presenter for CallLog {
        fn clear(&mut self) {
            self.calls.push("clear".into());
        }

        fn show(&mut self, rows: Vec<ResultRow>) {
            self.calls.push(format!("show({})", rows.len()));
        }

        fn hide(&mut self) {
            self.calls.push("hide".into());
        }
    }

    fn widget() -> SearchWidget<CallLog> {
        let index = SymbolIndex::new(vec![
            Entry::new("imageformats.png.read_png", "png.html#read_png"),
            Entry::new("imageformats.bmp.read_bmp", "bmp.html#read_bmp"),
        ]);
        SearchWidget::new(index, CallLog::default())
    }

    #[test]
    fn test_update_clears_before_showing() {
        let mut widget = widget();
        widget.update("read", Some(KeyCode(68))).unwrap();
        assert_eq!(widget.presenter().calls, vec!["clear", "show(2)"]);
    }

    #[test]
    fn test_update_without_key_event() {
        let mut widget = widget();
        widget.update("bmp", None).unwrap();
        assert_eq!(widget.presenter().calls, vec!["clear", "show(1)"]);
    }

    #[test]
    fn test_empty_query_hides() {
        let mut widget = widget();
        widget.update("", Some(KeyCode(8))).unwrap();
        assert_eq!(widget.presenter().calls, vec!["clear", "hide"]);
    }

    #[test]
    fn test_escape_overrides_query() {
        let mut widget = widget();
        widget.update("read", Some(KeyCode::ESCAPE)).unwrap();
        assert_eq!(widget.presenter().calls, vec!["clear", "hide"]);
    }

    #[test]
    fn test_invalid_pattern_hides_and_errors() {
        let mut widget = widget();
        let err = widget.update("read_(", Some(KeyCode(57))).unwrap_err();
        assert!(err.is_invalid_pattern());
        assert_eq!(widget.presenter().calls, vec!["clear", "hide"]);
    }

    #[test]
    fn test_dismiss_only_reacts_to_escape() {
        let mut widget = widget();
        widget.dismiss(KeyCode(13));
        assert!(widget.presenter().calls.is_empty());

        widget.dismiss(KeyCode::ESCAPE);
        assert_eq!(widget.presenter().calls, vec!["clear", "hide"]);
    }

    #[test]
    fn test_key_code_helpers() {
        assert!(KeyCode::from(27).is_escape());
        assert!(!KeyCode(0).is_escape());
        assert_eq!(KeyCode::ESCAPE.to_string(), "27");
    }
}
