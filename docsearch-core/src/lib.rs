//! docsearch-core - symbol lookup for generated documentation sites
//!
//! ```text
//! SymbolIndex ──► Matcher ──► rows ──► Presenter (ResultContainer / HtmlTable / ...)
//!                    ▲                     ▲
//!          SearchWidget::update ──────────┘
//!          SearchWidget::dismiss ─────────┘
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod html;
pub mod index;
pub mod matcher;
pub mod presenter;
pub mod widget;

pub use config::DocsearchConfig;
pub use container::{ResultContainer, Visibility};
pub use error::{DocsearchError, Result};
pub use html::HtmlTable;
pub use index::{Entry, IndexFormat, SymbolIndex};
pub use matcher::{compile_pattern, filter_index, match_entries, MatchMode, Matcher};
pub use presenter::{Presenter, ResultLink, ResultRow, NO_RESULTS};
pub use widget::{KeyCode, SearchWidget};
