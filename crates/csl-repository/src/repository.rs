//! The style repository: loading, discovery, and the default style.

use crate::config::RepositoryConfig;
use crate::error::{Result, StyleError};
use crate::parser::parse_style;
use crate::resolver::StyleResolver;
use crate::source::{DirectorySource, EmbeddedSource, FilesystemSource, StyleSource};
use crate::style::CitationStyle;
use once_cell::sync::OnceCell;

/// Loads citation styles and caches the bundled corpus.
///
/// Construct one per application and hand out references; each instance
/// keeps its own discovery cache, filled on the first call to
/// [`discover_all`](StyleRepository::discover_all) and never invalidated.
/// Styles loaded by explicit identifier are never cached.
///
/// # Example
///
/// ```rust
/// use csl_repository::StyleRepository;
///
/// let repository = StyleRepository::bundled();
///
/// let ieee = repository.default_style();
/// assert_eq!(ieee.title(), "IEEE");
///
/// let styles = repository.discover_all();
/// assert!(styles.contains(&ieee));
/// ```
#[derive(Debug)]
pub struct StyleRepository {
    config: RepositoryConfig,
    resolver: StyleResolver,
    discovered: OnceCell<Vec<CitationStyle>>,
}

impl StyleRepository {
    /// Build a repository from configuration.
    ///
    /// When `styles-dir` is set, that directory replaces the embedded corpus
    /// as the bundled root.
    pub fn new(config: RepositoryConfig) -> Self {
        let bundled: Box<dyn StyleSource> = match &config.styles_dir {
            Some(dir) => Box::new(DirectorySource::new(dir)),
            None => Box::new(EmbeddedSource::bundled()),
        };
        Self::with_sources(config, bundled, Box::new(FilesystemSource))
    }

    /// A repository over the embedded corpus with default settings.
    pub fn bundled() -> Self {
        Self::new(RepositoryConfig::default())
    }

    pub fn with_sources(
        config: RepositoryConfig,
        bundled: Box<dyn StyleSource>,
        external: Box<dyn StyleSource>,
    ) -> Self {
        let resolver = StyleResolver::new(bundled, external, &config);
        Self {
            config,
            resolver,
            discovered: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Whether `identifier` names a style file, judged by its suffix alone.
    pub fn is_style_file(&self, identifier: &str) -> bool {
        self.resolver.is_style_file(identifier)
    }

    /// Resolve and parse a style, keeping the reason for any failure.
    pub fn try_load(&self, identifier: &str) -> Result<CitationStyle> {
        let source = self.resolver.resolve(identifier)?;
        parse_style(&source, identifier)
    }

    /// Resolve and parse a style by bundled name or filesystem path.
    ///
    /// Failures are logged and reported as `None`.
    pub fn load_from_file(&self, identifier: &str) -> Option<CitationStyle> {
        self.try_load(identifier).inspect_err(StyleError::log).ok()
    }

    /// The configured default style, or [`CitationStyle::empty`] if it
    /// cannot be loaded.
    pub fn default_style(&self) -> CitationStyle {
        self.load_from_file(&self.config.default_style)
            .unwrap_or_else(CitationStyle::empty)
    }

    /// Every usable style in the bundled root.
    ///
    /// The first call enumerates and parses the bundled root; later calls
    /// return the same slice. Styles that fail to load are left out, and if
    /// the root cannot be enumerated at all the result is empty.
    pub fn discover_all(&self) -> &[CitationStyle] {
        self.discovered.get_or_init(|| match self.discover() {
            Ok(styles) => {
                tracing::debug!(count = styles.len(), "discovered citation styles");
                styles
            }
            Err(err) => {
                err.log();
                Vec::new()
            }
        })
    }

    /// Whether discovery has already run.
    pub fn is_discovered(&self) -> bool {
        self.discovered.get().is_some()
    }

    fn discover(&self) -> Result<Vec<CitationStyle>> {
        let bundled = self.resolver.bundled();

        if let Some(anchor) = &self.config.discovery_anchor
            && !bundled.contains(anchor)
        {
            return Err(StyleError::EnumerationFailed {
                location: bundled.describe(),
                reason: format!("anchor style {} not found", anchor),
            });
        }

        let names = bundled
            .list()
            .map_err(|e| StyleError::EnumerationFailed {
                location: bundled.describe(),
                reason: e.to_string(),
            })?;

        Ok(names
            .iter()
            .filter(|name| self.is_style_file(name))
            .filter_map(|name| self.load_from_file(name))
            .collect())
    }
}

impl Default for StyleRepository {
    fn default() -> Self {
        Self::bundled()
    }
}
