//! Maps a style identifier to raw style text.

use crate::config::{RepositoryConfig, has_extension};
use crate::error::{Result, StyleError};
use crate::source::{FilesystemSource, StyleSource};

/// Resolves identifiers against a bundled source, then an external one.
///
/// A bare name such as `ieee.csl` (or `/ieee.csl`) is looked up in the
/// bundled source. Anything the bundled source does not have is handed to
/// the external source as a path.
#[derive(Debug)]
pub struct StyleResolver {
    bundled: Box<dyn StyleSource>,
    external: Box<dyn StyleSource>,
    extensions: Vec<String>,
}

impl StyleResolver {
    pub fn new(
        bundled: Box<dyn StyleSource>,
        external: Box<dyn StyleSource>,
        config: &RepositoryConfig,
    ) -> Self {
        Self {
            bundled,
            external,
            extensions: config.extensions.clone(),
        }
    }

    /// Use the local filesystem as the external source.
    pub fn with_filesystem(bundled: Box<dyn StyleSource>, config: &RepositoryConfig) -> Self {
        Self::new(bundled, Box::new(FilesystemSource), config)
    }

    pub fn bundled(&self) -> &dyn StyleSource {
        self.bundled.as_ref()
    }

    /// Whether `identifier` carries a recognized style-file extension.
    pub fn is_style_file(&self, identifier: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| has_extension(identifier, ext))
    }

    /// Read the full text of the style named by `identifier`.
    ///
    /// The extension is checked before any I/O.
    pub fn resolve(&self, identifier: &str) -> Result<String> {
        if !self.is_style_file(identifier) {
            return Err(StyleError::UnsupportedExtension {
                identifier: identifier.to_string(),
            });
        }

        let bundled_name = bundled_name(identifier);
        if self.bundled.contains(bundled_name) {
            tracing::trace!(identifier, source = %self.bundled.describe(), "resolved bundled style");
            return self
                .bundled
                .read(bundled_name)
                .map_err(|e| StyleError::from_io(identifier, e));
        }

        tracing::trace!(identifier, source = %self.external.describe(), "resolving external style");
        self.external
            .read(identifier)
            .map_err(|e| StyleError::from_io(identifier, e))
    }
}

/// Name of `identifier` inside the bundled root.
///
/// Bundled names are rooted at the style directory, so a leading separator
/// carries no meaning there.
fn bundled_name(identifier: &str) -> &str {
    identifier.trim_start_matches('/')
}
