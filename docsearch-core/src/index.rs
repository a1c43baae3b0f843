//! Symbol index - the generator's `{qualifiedName -> url}` list.
//!
//! The index is produced by the documentation generator and handed to us as an
//! immutable artifact. Two shapes are accepted:
//!
//! ```text
//! JSON   [{"imageformats.png.read_png": "imageformats/png.html#read_png"}, ...]
//! Script var items = [ {...}, {...}, ];   (the generated search.js)
//! ```
//!
//! Only structure is checked here. Duplicate names or dangling urls are the
//! generator's business and pass through untouched.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DocsearchError, Result};

/// Placeholder path used for errors raised while parsing in-memory content
const INLINE_SOURCE: &str = "<inline>";

/// Locates the `items = [` assignment in a generated script
static ITEMS_ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bitems\s*=\s*\[").unwrap());

/// One searchable symbol and the page/anchor it links to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Dot-delimited identifier, e.g. `imageformats.png.read_png`
    pub qualified_name: String,
    /// Opaque destination, usually a relative link with a fragment
    pub url: String,
}

impl Entry {
    pub fn new(qualified_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            url: url.into(),
        }
    }
}

/// On-disk shape of the index artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// Plain JSON array of single-key objects
    Json,
    /// Generated JavaScript containing `var items = [...]`
    Script,
}

impl IndexFormat {
    /// Guess the format from content: a leading `[` means JSON
    pub fn detect(content: &str) -> Self {
        if content.trim_start().starts_with('[') {
            IndexFormat::Json
        } else {
            IndexFormat::Script
        }
    }
}

/// Immutable, ordered list of entries fixed at load time
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: Vec<Entry>,
    /// Lowercased qualified names, parallel to `entries`
    folded: Vec<String>,
}

impl SymbolIndex {
    pub fn new(entries: Vec<Entry>) -> Self {
        let folded = entries
            .iter()
            .map(|entry| entry.qualified_name.to_lowercase())
            .collect();
        Self { entries, folded }
    }

    /// Load an index file, detecting the format when `format` is `None`
    pub fn load(path: impl AsRef<Path>, format: Option<IndexFormat>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let format = format.unwrap_or_else(|| IndexFormat::detect(&content));

        let index = Self::parse(&content, format).map_err(|err| attach_path(err, path))?;
        info!(
            path = %path.display(),
            format = ?format,
            entries = index.len(),
            "loaded symbol index"
        );
        Ok(index)
    }

    pub fn parse(content: &str, format: IndexFormat) -> Result<Self> {
        match format {
            IndexFormat::Json => Self::from_json_str(content),
            IndexFormat::Script => Self::from_script_str(content),
        }
    }

    /// Parse a JSON array of `{"name": "url"}` items
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|err| DocsearchError::json("index item list", err))?;
        Self::from_items(&value)
    }

    /// Parse the generated script, pulling out the `items` array literal
    pub fn from_script_str(content: &str) -> Result<Self> {
        let start = ITEMS_ASSIGNMENT
            .find(content)
            .map(|m| m.end() - 1)
            .ok_or_else(|| {
                DocsearchError::invalid_format(INLINE_SOURCE, "no `items = [` assignment found")
            })?;

        let literal = array_literal_to_json(&content[start..]).ok_or_else(|| {
            DocsearchError::invalid_format(INLINE_SOURCE, "unterminated `items` array literal")
        })?;
        debug!(bytes = literal.len(), "extracted items literal from script");

        Self::from_json_str(&literal)
    }

    fn from_items(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            DocsearchError::invalid_format(INLINE_SOURCE, "index must be a JSON array")
        })?;

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| entry_from_item(idx, item))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Entries paired with their lowercased qualified name, in index order
    pub fn iter_folded(&self) -> impl Iterator<Item = (&Entry, &str)> {
        self.entries
            .iter()
            .zip(self.folded.iter().map(String::as_str))
    }
}

impl FromIterator<Entry> for SymbolIndex {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SymbolIndex {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn entry_from_item(idx: usize, item: &Value) -> Result<Entry> {
    let object = item
        .as_object()
        .ok_or_else(|| DocsearchError::malformed_entry(idx, "item is not an object"))?;

    let mut fields = object.iter();
    let (name, url) = match (fields.next(), fields.next()) {
        (Some(field), None) => field,
        (None, _) => return Err(DocsearchError::malformed_entry(idx, "item is empty")),
        (Some(_), Some(_)) => {
            return Err(DocsearchError::malformed_entry(
                idx,
                format!("expected one name per item, found {}", object.len()),
            ))
        }
    };

    let url = url.as_str().ok_or_else(|| {
        DocsearchError::malformed_entry(idx, format!("url for '{name}' is not a string"))
    })?;

    Ok(Entry::new(name.clone(), url))
}

/// Re-point an inline-sourced format error at the file it came from
fn attach_path(err: DocsearchError, path: &Path) -> DocsearchError {
    match err {
        DocsearchError::InvalidFormat { reason, .. } => {
            DocsearchError::invalid_format(PathBuf::from(path), reason)
        }
        other => other,
    }
}

/// Cut the array literal starting at `source[0] == '['` and make it valid JSON.
///
/// Generated scripts leave a trailing comma after the last item, which JSON
/// rejects. Commas directly before a closing bracket are dropped; string
/// contents are copied verbatim. Returns `None` when the brackets never close.
fn array_literal_to_json(source: &str) -> Option<String> {
    let mut out = String::with_capacity(source.len());
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut pending_comma = false;

    for ch in source.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch.is_whitespace() {
            out.push(ch);
            continue;
        }

        if pending_comma {
            if ch != ']' && ch != '}' {
                out.push(',');
            }
            pending_comma = false;
        }

        match ch {
            ',' => pending_comma = true,
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '[' | '{' => {
                depth += 1;
                out.push(ch);
            }
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                out.push(ch);
                if depth == 0 {
                    return Some(out);
                }
            }
            _ => out.push(ch),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#""use strict";
var items = [
{"imageformats.png" : "imageformats/png.html"},
{"imageformats.png.read_png" : "imageformats/png.html#read_png"},
{"imageformats.bmp.read_bmp" : "imageformats/bmp.html#read_bmp"},
];
function search(str) {
	return [];
}
"#;

    #[test]
    fn test_parse_json_items() {
        let index = SymbolIndex::from_json_str(
            r#"[{"a.b": "a.html#b"}, {"a.c": "a.html#c"}]"#,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0), Some(&Entry::new("a.b", "a.html#b")));
        assert_eq!(index.get(1).unwrap().url, "a.html#c");
    }

    #[test]
    fn test_parse_generated_script() {
        let index = SymbolIndex::from_script_str(SCRIPT).unwrap();
        let names: Vec<_> = index.iter().map(|e| e.qualified_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "imageformats.png",
                "imageformats.png.read_png",
                "imageformats.bmp.read_bmp"
            ]
        );
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(IndexFormat::detect("  \n[{}]"), IndexFormat::Json);
        assert_eq!(IndexFormat::detect(SCRIPT), IndexFormat::Script);
    }

    #[test]
    fn test_script_without_items() {
        let err = SymbolIndex::from_script_str("var other = [];").unwrap_err();
        assert!(matches!(err, DocsearchError::InvalidFormat { .. }));
    }

    #[test]
    fn test_script_unterminated_items() {
        let err = SymbolIndex::from_script_str(r#"var items = [{"a": "b"},"#).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_brackets_inside_strings_are_ignored() {
        let literal = array_literal_to_json(r#"[{"a[0]": "x.html#]},"},]; trailing"#).unwrap();
        assert_eq!(literal, r#"[{"a[0]": "x.html#]},"}]"#);
    }

    #[test]
    fn test_malformed_items() {
        let err = SymbolIndex::from_json_str(r#"[{"a": "x"}, "b"]"#).unwrap_err();
        assert!(matches!(err, DocsearchError::MalformedEntry { index: 1, .. }));

        let err = SymbolIndex::from_json_str(r#"[{"a": "x", "b": "y"}]"#).unwrap_err();
        assert!(matches!(err, DocsearchError::MalformedEntry { index: 0, .. }));

        let err = SymbolIndex::from_json_str(r#"[{"a": 1}]"#).unwrap_err();
        assert!(err.to_string().contains("not a string"));

        let err = SymbolIndex::from_json_str(r#"{"a": "x"}"#).unwrap_err();
        assert!(matches!(err, DocsearchError::InvalidFormat { .. }));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let index = SymbolIndex::from_json_str(r#"[{"a": "1"}, {"a": "2"}]"#).unwrap();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_folded_names() {
        let index: SymbolIndex = vec![Entry::new("imageformats.IFImage16", "x")]
            .into_iter()
            .collect();
        let (entry, folded) = index.iter_folded().next().unwrap();
        assert_eq!(entry.qualified_name, "imageformats.IFImage16");
        assert_eq!(folded, "imageformats.ifimage16");
    }
}
