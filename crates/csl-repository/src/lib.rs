//! Discovery, validation and caching of CSL citation styles.
//!
//! A citation style is a CSL (Citation Style Language) XML document. This
//! crate finds style documents, either in a corpus bundled with the
//! application or at arbitrary filesystem paths, checks that each one can
//! render a reference list, and hands out immutable [`CitationStyle`]
//! records to whatever renders bibliographies or lists styles for the user.
//!
//! # Overview
//!
//! - [`StyleRepository`]: the entry point; loads styles by identifier,
//!   discovers the bundled corpus once, and supplies a default style
//! - [`CitationStyle`]: a parsed style; equal to another iff the source
//!   text is identical
//! - [`StyleSource`]: where text comes from ([`EmbeddedSource`],
//!   [`DirectorySource`], [`FilesystemSource`], [`MemorySource`])
//! - [`StyleError`]: why a style could not be loaded
//!
//! Loading never fails loudly. [`StyleRepository::load_from_file`] logs the
//! problem through `tracing` and returns `None`; use
//! [`StyleRepository::try_load`] to see the reason instead.
//!
//! # Example
//!
//! ```rust
//! use csl_repository::{StyleRepository, is_style_file};
//!
//! assert!(is_style_file("ieee.csl"));
//! assert!(!is_style_file("ieee.xml"));
//!
//! let repository = StyleRepository::bundled();
//! let apa = repository.load_from_file("apa.csl").unwrap();
//! assert_eq!(apa.to_string(), apa.title());
//!
//! // Citation-only styles cannot render a bibliography
//! assert!(repository.load_from_file("bluebook-inline.csl").is_none());
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod repository;
pub mod resolver;
pub mod source;
pub mod style;

// Re-export main types
pub use config::{DEFAULT_STYLE, RepositoryConfig, is_style_file};
pub use error::{Result, StyleError};
pub use parser::{parse_style, strip_invalid_prolog};
pub use repository::StyleRepository;
pub use resolver::StyleResolver;
pub use source::{DirectorySource, EmbeddedSource, FilesystemSource, MemorySource, StyleSource};
pub use style::CitationStyle;
