//! Repository configuration.
//!
//! Every field has a default, so an empty document (or no document at all)
//! yields the stock behaviour: styles come from the corpus compiled into
//! the binary, the default style is IEEE, and only `.csl` files count.
//!
//! ```yaml
//! styles-dir: /usr/share/citation-styles
//! default-style: apa.csl
//! discovery-anchor: apa.csl
//! extensions: [csl]
//! ```

use crate::error::{Result, StyleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Identifier of the style used when nothing else has been chosen.
pub const DEFAULT_STYLE: &str = "/ieee.csl";

/// Bundled style whose presence marks a usable style directory.
pub const DISCOVERY_ANCHOR: &str = "acm-siggraph.csl";

/// Extension carried by CSL style files.
pub const STYLE_EXTENSION: &str = "csl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RepositoryConfig {
    /// Directory to use as the bundled style root instead of the embedded
    /// corpus.
    pub styles_dir: Option<PathBuf>,

    pub default_style: String,

    /// Style that must exist in the bundled root before discovery runs.
    /// `None` disables the check.
    pub discovery_anchor: Option<String>,

    /// Recognized style-file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            styles_dir: None,
            default_style: DEFAULT_STYLE.to_string(),
            discovery_anchor: Some(DISCOVERY_ANCHOR.to_string()),
            extensions: vec![STYLE_EXTENSION.to_string()],
        }
    }
}

impl RepositoryConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse_yaml(content, Path::new("<inline>"))
    }

    /// Read and parse a YAML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StyleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse_yaml(&content, path)
    }

    fn parse_yaml(content: &str, path: &Path) -> Result<Self> {
        // An empty document deserializes as null rather than an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| StyleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether `identifier` ends with one of the configured extensions.
    ///
    /// Purely syntactic; never touches the filesystem.
    pub fn is_style_file(&self, identifier: &str) -> bool {
        self.extensions.iter().any(|ext| has_extension(identifier, ext))
    }
}

pub(crate) fn has_extension(identifier: &str, ext: &str) -> bool {
    identifier
        .strip_suffix(ext)
        .is_some_and(|stem| stem.ends_with('.'))
}

/// Whether `identifier` names a CSL style file, judged by suffix alone.
pub fn is_style_file(identifier: &str) -> bool {
    has_extension(identifier, STYLE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_style_file() {
        assert!(is_style_file("ieee.csl"));
        assert!(is_style_file("/no/such/dir/apa.csl"));
        assert!(!is_style_file("ieee.CSL"));
        assert!(!is_style_file("ieeecsl"));
        assert!(!is_style_file("ieee.csl.bak"));
        assert!(!is_style_file(""));
    }

    #[test]
    fn test_configured_extensions() {
        let config = RepositoryConfig {
            extensions: vec!["csl".to_string(), "xml".to_string()],
            ..RepositoryConfig::default()
        };
        assert!(config.is_style_file("style.xml"));
        assert!(config.is_style_file("style.csl"));
        assert!(!config.is_style_file("style.txt"));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = RepositoryConfig::from_yaml_str("default-style: apa.csl\n").unwrap();
        assert_eq!(config.default_style, "apa.csl");
        assert_eq!(config.discovery_anchor.as_deref(), Some(DISCOVERY_ANCHOR));
        assert_eq!(config.extensions, vec!["csl".to_string()]);
        assert!(config.styles_dir.is_none());
    }

    #[test]
    fn test_from_yaml_full() {
        let config = RepositoryConfig::from_yaml_str(
            "styles-dir: /opt/styles\ndefault-style: apa.csl\ndiscovery-anchor: null\nextensions: [csl, xml]\n",
        )
        .unwrap();
        assert_eq!(config.styles_dir, Some(PathBuf::from("/opt/styles")));
        assert_eq!(config.discovery_anchor, None);
        assert_eq!(config.extensions.len(), 2);
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(
            RepositoryConfig::from_yaml_str("").unwrap(),
            RepositoryConfig::default()
        );
    }

    #[test]
    fn test_from_yaml_rejects_wrong_types() {
        let err = RepositoryConfig::from_yaml_str("extensions: 3\n").unwrap_err();
        assert!(matches!(err, StyleError::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.yml");
        std::fs::write(&path, "default-style: chicago.csl\n").unwrap();

        let config = RepositoryConfig::from_file(&path).unwrap();
        assert_eq!(config.default_style, "chicago.csl");

        let missing = RepositoryConfig::from_file(&dir.path().join("absent.yml"));
        assert!(matches!(missing, Err(StyleError::Config { .. })));
    }
}
