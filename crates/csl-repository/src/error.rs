//! Error types for style resolution, parsing and discovery.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for csl-repository operations.
pub type Result<T> = std::result::Result<T, StyleError>;

/// Every way loading or discovering a style can fail.
///
/// None of these escape the `Option`-returning surface of
/// [`StyleRepository`](crate::StyleRepository); they are logged there via
/// [`StyleError::log`] and surface as absence.
#[derive(Error, Debug)]
pub enum StyleError {
    /// The identifier does not carry a recognized style-file extension.
    #[error("Can only load style files: {identifier}")]
    UnsupportedExtension { identifier: String },

    /// Neither the bundled source nor the filesystem has the style.
    #[error("Could not find file: {identifier}")]
    NotFound { identifier: String },

    #[error("Error reading source file {identifier}: {source}")]
    Io {
        identifier: String,
        #[source]
        source: io::Error,
    },

    #[error("Error while parsing {identifier}: {source}")]
    Malformed {
        identifier: String,
        #[source]
        source: csl_xml::Error,
    },

    /// Well-formed, but the style cannot render a reference list.
    #[error("No bibliography element in {identifier}")]
    MissingBibliography { identifier: String },

    #[error("No info/title in {identifier}")]
    MissingTitle { identifier: String },

    /// Raw text or identifier was empty; nothing to parse.
    #[error("Nothing to parse for '{identifier}'")]
    Empty { identifier: String },

    #[error("Could not enumerate bundled styles in {location}: {reason}")]
    EnumerationFailed { location: String, reason: String },

    #[error("Invalid repository configuration {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl StyleError {
    /// Map an I/O failure while reading `identifier` to the matching variant.
    pub(crate) fn from_io(identifier: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            StyleError::NotFound {
                identifier: identifier.to_string(),
            }
        } else {
            StyleError::Io {
                identifier: identifier.to_string(),
                source: err,
            }
        }
    }

    /// Whether the document was well-formed but is not a usable style.
    ///
    /// This is the expected outcome for citation-only styles when scanning a
    /// corpus, as opposed to a broken file.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            StyleError::MissingBibliography { .. } | StyleError::MissingTitle { .. }
        )
    }

    /// Emit this error at the level its kind warrants.
    pub fn log(&self) {
        match self {
            StyleError::Empty { .. } => tracing::trace!("{}", self),
            StyleError::MissingBibliography { .. } | StyleError::MissingTitle { .. } => {
                tracing::debug!("{}", self)
            }
            StyleError::NotFound { .. } => tracing::warn!("{}", self),
            StyleError::Io { source, .. } => {
                tracing::error!(error = %source, "{}", self)
            }
            StyleError::Malformed { source, .. } => {
                tracing::error!(error = %source, "{}", self)
            }
            StyleError::UnsupportedExtension { .. }
            | StyleError::EnumerationFailed { .. }
            | StyleError::Config { .. } => tracing::error!("{}", self),
        }
    }
}
