/// Structured error types for the docsearch-core library.
///
/// Uses `thiserror` so library consumers can match on the failure kind.
/// The binary crate (docsearch-cli) wraps these in `anyhow` with context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docsearch-core operations
#[derive(Error, Debug)]
pub enum DocsearchError {
    /// The query text could not be compiled as a search pattern
    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// The index artifact does not have the expected shape
    #[error("Invalid index format in {path:?}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// A single item of the index list could not be read as an entry
    #[error("Malformed index entry at position {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for docsearch-core operations
pub type Result<T> = std::result::Result<T, DocsearchError>;

impl DocsearchError {
    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed entry error
    pub fn malformed_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            index,
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True when the failure came from compiling the user's query
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocsearchError::malformed_entry(3, "url is not a string");
        assert_eq!(
            err.to_string(),
            "Malformed index entry at position 3: url is not a string"
        );

        let err = DocsearchError::invalid_format("/tmp/search.js", "no items array");
        assert!(err.to_string().contains("Invalid index format"));
        assert!(err.to_string().contains("/tmp/search.js"));
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("read_(png").unwrap_err();
        let err = DocsearchError::invalid_pattern("read_(png", source);
        assert!(err.is_invalid_pattern());
        assert!(err.to_string().starts_with("Invalid search pattern 'read_(png'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: DocsearchError = io_err.into();

        assert!(matches!(err, DocsearchError::Io { .. }));
        assert!(!err.is_invalid_pattern());
    }
}
