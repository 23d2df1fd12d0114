//! Where raw style text comes from.
//!
//! A [`StyleSource`] is a named collection of style documents. The resolver
//! consults a bundled source first and falls back to an external one, so
//! each origin only has to know how to look up and read its own entries.

use include_dir::{Dir, include_dir};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Styles compiled into the binary.
static BUNDLED_STYLES: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/csl-styles");

/// Read access to a collection of style documents.
///
/// Names are relative to the source's root and never start with `/`,
/// except for [`FilesystemSource`], which takes paths as given.
pub trait StyleSource: fmt::Debug + Send + Sync {
    /// Human-readable location, for log output.
    fn describe(&self) -> String;

    /// Whether an entry with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// Read an entry fully as UTF-8 text.
    ///
    /// A missing entry is reported with [`io::ErrorKind::NotFound`].
    fn read(&self, name: &str) -> io::Result<String>;

    /// Names of the entries directly in the root, in the order the
    /// underlying listing yields them.
    fn list(&self) -> io::Result<Vec<String>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("{} cannot be enumerated", self.describe()),
        ))
    }
}

fn not_found(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("no such style: {}", name))
}

/// The style corpus embedded at compile time.
#[derive(Clone, Copy)]
pub struct EmbeddedSource {
    dir: &'static Dir<'static>,
}

impl EmbeddedSource {
    /// The corpus shipped with this crate.
    pub fn bundled() -> Self {
        Self {
            dir: &BUNDLED_STYLES,
        }
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::bundled()
    }
}

impl fmt::Debug for EmbeddedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedSource")
            .field("files", &self.dir.files().count())
            .finish()
    }
}

impl StyleSource for EmbeddedSource {
    fn describe(&self) -> String {
        "embedded styles".to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.dir.get_file(name).is_some()
    }

    fn read(&self, name: &str) -> io::Result<String> {
        let file = self.dir.get_file(name).ok_or_else(|| not_found(name))?;
        file.contents_utf8().map(str::to_string).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            )
        })
    }

    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self
            .dir
            .files()
            .filter_map(|f| f.path().file_name())
            .filter_map(|n| n.to_str())
            .map(str::to_string)
            .collect())
    }
}

/// A style root on disk, used in place of the embedded corpus.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl StyleSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.root.join(name).is_file()
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(name))
    }

    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            // Follow symlinks so listing agrees with `contains`
            if !fs::metadata(entry.path())?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

/// Arbitrary paths on the local filesystem.
///
/// Relative paths resolve against the working directory. This source has no
/// root to enumerate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemSource;

impl StyleSource for FilesystemSource {
    fn describe(&self) -> String {
        "filesystem".to_string()
    }

    fn contains(&self, name: &str) -> bool {
        Path::new(name).is_file()
    }

    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(name)
    }
}

/// Styles held in memory, listed in insertion order.
///
/// Useful for hosts without a filesystem and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any existing entry with the same name.
    pub fn with(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = content,
            None => self.entries.push((name, content)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StyleSource for MemorySource {
    fn describe(&self) -> String {
        "in-memory styles".to_string()
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| not_found(name))
    }

    fn list(&self) -> io::Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !n.contains('/'))
            .map(str::to_string)
            .collect())
    }
}
