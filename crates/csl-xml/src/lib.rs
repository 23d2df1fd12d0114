//! Span-tracked XML parsing for CSL style documents.
//!
//! This crate wraps [`quick-xml`] to provide a tree of [`XmlElement`]s where
//! each element and text node records the byte range it occupies in the
//! input text. The whole document is read into memory; CSL styles are compact
//! documents in a well-known dialect.
//!
//! # Overview
//!
//! The main types are:
//! - [`XmlDocument`]: The parsed document
//! - [`XmlElement`]: An element with name, attributes, children, and span
//! - [`XmlAttribute`]: An attribute with its unescaped value
//! - [`XmlChildren`]: Element content (elements, text, mixed, or empty)
//!
//! # Example
//!
//! ```rust
//! use csl_xml::parse;
//!
//! let xml = parse(r#"<style version="1.0">
//!   <info><title>IEEE</title></info>
//!   <bibliography><layout/></bibliography>
//! </style>"#).unwrap();
//!
//! assert_eq!(xml.root.name, "style");
//! assert_eq!(xml.root.get_attribute("version"), Some("1.0"));
//!
//! let title = xml.find("info").and_then(|info| info.find_descendant("title"));
//! assert_eq!(title.and_then(|t| t.first_child_text()), Some("IEEE"));
//! assert_eq!(xml.elements_by_name("bibliography").count(), 1);
//! ```
//!
//! # Entity handling
//!
//! Entities declared in a DOCTYPE internal subset are not expanded and
//! external entities are never resolved; referencing one is a syntax error.

pub mod error;
pub mod parser;
pub mod types;

// Re-export main types
pub use error::{Error, Result};
pub use parser::parse;
pub use types::{Descendants, Span, XmlAttribute, XmlChild, XmlChildren, XmlDocument, XmlElement};
