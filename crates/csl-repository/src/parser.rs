//! Turns raw style text into a validated [`CitationStyle`].

use crate::error::{Result, StyleError};
use crate::style::CitationStyle;

/// Drop anything in front of the first `<`.
///
/// Style files in the wild sometimes start with a byte-order mark, stray
/// whitespace or other junk before the XML declaration. Text without any
/// `<` is returned unchanged.
pub fn strip_invalid_prolog(source: &str) -> &str {
    match source.find('<') {
        Some(start) => &source[start..],
        None => source,
    }
}

/// Parse `source` (loaded from `identifier`) into a citation style.
///
/// The document must contain a `bibliography` element somewhere, and the
/// first child node of the first `title` inside the first `info` element
/// must be character data; that text becomes the title, verbatim. The
/// returned record keeps `source` exactly as given, prologue included.
pub fn parse_style(source: &str, identifier: &str) -> Result<CitationStyle> {
    if source.is_empty() || identifier.is_empty() {
        return Err(StyleError::Empty {
            identifier: identifier.to_string(),
        });
    }

    let xml = csl_xml::parse(strip_invalid_prolog(source)).map_err(|e| StyleError::Malformed {
        identifier: identifier.to_string(),
        source: e,
    })?;

    if xml.find("bibliography").is_none() {
        return Err(StyleError::MissingBibliography {
            identifier: identifier.to_string(),
        });
    }

    let title = xml
        .find("info")
        .and_then(|info| info.find_descendant("title"))
        .and_then(|title| title.first_child_text())
        .ok_or_else(|| StyleError::MissingTitle {
            identifier: identifier.to_string(),
        })?;

    Ok(CitationStyle::new(
        identifier.to_string(),
        title.to_string(),
        source.to_string(),
    ))
}

impl CitationStyle {
    /// Parse a style from its text, logging and discarding any failure.
    pub fn from_source(source: &str, identifier: &str) -> Option<CitationStyle> {
        parse_style(source, identifier)
            .inspect_err(StyleError::log)
            .ok()
    }
}
