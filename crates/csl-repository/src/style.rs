//! The parsed citation style record.

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

const EMPTY_TITLE: &str = "Empty";

/// A validated CSL style: where it came from, its title, and its full text.
///
/// Records are only produced by a successful parse (see
/// [`parse_style`](crate::parser::parse_style)), apart from the
/// [`empty`](CitationStyle::empty) sentinel. They are never mutated.
///
/// Two records are equal when their source text is byte-identical. The path
/// and title do not take part, so the same style loaded from two locations
/// collapses to one entry in a set or map.
#[derive(Debug, Clone, Serialize)]
pub struct CitationStyle {
    path: String,
    title: String,
    source: String,
}

impl CitationStyle {
    pub(crate) fn new(path: String, title: String, source: String) -> Self {
        Self {
            path,
            title,
            source,
        }
    }

    /// The fallback record used when even the default style cannot be loaded.
    pub fn empty() -> Self {
        Self::new(String::new(), EMPTY_TITLE.to_string(), String::new())
    }

    /// Whether this is the [`empty`](CitationStyle::empty) sentinel.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.source.is_empty()
    }

    /// The identifier this style was loaded from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The complete document text, exactly as read.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PartialEq for CitationStyle {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CitationStyle {}

impl Hash for CitationStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
