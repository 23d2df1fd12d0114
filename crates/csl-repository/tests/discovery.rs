//! Discovery and loading over an on-disk style root.

use csl_repository::{
    CitationStyle, DirectorySource, MemorySource, RepositoryConfig, StyleError, StyleRepository,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn csl(title: &str, bibliography: bool) -> String {
    let bibliography = if bibliography {
        "  <bibliography>\n    <layout><text variable=\"title\"/></layout>\n  </bibliography>\n"
    } else {
        ""
    };
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<style xmlns="http://purl.org/net/xbiblio/csl" class="in-text" version="1.0">
  <info>
    <title>{}</title>
  </info>
  <citation>
    <layout><text variable="citation-number"/></layout>
  </citation>
{}</style>
"#,
        title, bibliography
    )
}

/// A style root with five usable styles and four that must be skipped.
fn corpus() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let usable = [
        ("acm-siggraph.csl", "ACM SIGGRAPH"),
        ("ieee.csl", "IEEE"),
        ("apa.csl", "APA"),
        ("nature.csl", "Nature"),
        ("vancouver.csl", "Vancouver"),
    ];
    for (name, title) in usable {
        fs::write(root.join(name), csl(title, true)).unwrap();
    }

    fs::write(root.join("bluebook-inline.csl"), csl("Bluebook", false)).unwrap();
    fs::write(root.join("broken.csl"), "<style><info><title>Broken</title>").unwrap();
    fs::write(root.join("untitled.csl"), "<style><bibliography/></style>").unwrap();
    fs::write(root.join("empty.csl"), "").unwrap();
    fs::write(root.join("notes.txt"), csl("Plain text", true)).unwrap();

    // One level deep only
    fs::create_dir(root.join("dependent")).unwrap();
    fs::write(root.join("dependent/deep.csl"), csl("Deep", true)).unwrap();

    dir
}

fn repository_for(root: &Path) -> StyleRepository {
    StyleRepository::new(RepositoryConfig {
        styles_dir: Some(root.to_path_buf()),
        ..RepositoryConfig::default()
    })
}

#[test]
fn test_discovers_exactly_the_usable_styles() {
    let dir = corpus();
    let repository = repository_for(dir.path());

    let mut titles: Vec<String> = repository
        .discover_all()
        .iter()
        .map(|s| s.title().to_string())
        .collect();
    titles.sort();

    assert_eq!(
        titles,
        vec!["ACM SIGGRAPH", "APA", "IEEE", "Nature", "Vancouver"]
    );
}

#[test]
fn test_discovered_title_matches_declared_title() {
    let dir = corpus();
    let repository = repository_for(dir.path());

    for style in repository.discover_all() {
        let source = fs::read_to_string(dir.path().join(style.path())).unwrap();
        assert!(source.contains(&format!("<title>{}</title>", style.title())));
    }
}

#[test]
fn test_discovery_is_memoized() {
    let dir = corpus();
    let repository = repository_for(dir.path());

    let first = repository.discover_all();
    assert_eq!(first.len(), 5);

    // Later changes on disk are not picked up
    fs::write(dir.path().join("late.csl"), csl("Late", true)).unwrap();
    let second = repository.discover_all();

    assert!(std::ptr::eq(first, second));
    assert!(second.iter().all(|s| s.title() != "Late"));
}

#[test]
fn test_missing_root_discovers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let repository = repository_for(&dir.path().join("missing"));

    assert!(repository.discover_all().is_empty());
    assert!(repository.is_discovered());
}

#[test]
fn test_missing_anchor_discovers_nothing() {
    let dir = corpus();
    fs::remove_file(dir.path().join("acm-siggraph.csl")).unwrap();

    let repository = repository_for(dir.path());
    assert!(repository.discover_all().is_empty());
}

#[test]
fn test_anchor_can_be_disabled() {
    let dir = corpus();
    fs::remove_file(dir.path().join("acm-siggraph.csl")).unwrap();

    let repository = StyleRepository::new(RepositoryConfig {
        styles_dir: Some(dir.path().to_path_buf()),
        discovery_anchor: None,
        ..RepositoryConfig::default()
    });
    assert_eq!(repository.discover_all().len(), 4);
}

#[test]
fn test_load_external_file() {
    let corpus = corpus();
    let elsewhere = tempfile::tempdir().unwrap();
    let path = elsewhere.path().join("custom.csl");
    fs::write(&path, csl("Custom", true)).unwrap();

    let repository = repository_for(corpus.path());
    let style = repository.load_from_file(path.to_str().unwrap()).unwrap();

    assert_eq!(style.title(), "Custom");
    assert_eq!(style.path(), path.to_str().unwrap());
    assert!(!repository.discover_all().contains(&style));
}

fn kind(err: &StyleError) -> &'static str {
    match err {
        StyleError::UnsupportedExtension { .. } => "unsupported-extension",
        StyleError::NotFound { .. } => "not-found",
        StyleError::Io { .. } => "io",
        StyleError::Malformed { .. } => "malformed",
        StyleError::MissingBibliography { .. } => "missing-bibliography",
        StyleError::MissingTitle { .. } => "missing-title",
        StyleError::Empty { .. } => "empty",
        StyleError::EnumerationFailed { .. } => "enumeration-failed",
        StyleError::Config { .. } => "config",
    }
}

#[test]
fn test_try_load_reports_each_failure_kind() {
    let dir = corpus();
    let repository = repository_for(dir.path());

    let cases = [
        ("notes.txt", "unsupported-extension"),
        ("absent.csl", "not-found"),
        ("broken.csl", "malformed"),
        ("bluebook-inline.csl", "missing-bibliography"),
        ("untitled.csl", "missing-title"),
        ("empty.csl", "empty"),
    ];

    for (identifier, expected) in cases {
        let err = repository.try_load(identifier).unwrap_err();
        assert_eq!(kind(&err), expected, "{}: {:?}", identifier, err);
        assert!(repository.load_from_file(identifier).is_none());
    }
}

#[test]
fn test_is_style_file_does_no_io() {
    let repository = repository_for(Path::new("/definitely/not/a/real/root"));

    assert!(repository.is_style_file("/definitely/not/a/real/file.csl"));
    assert!(!repository.is_style_file("/definitely/not/a/real/file.txt"));
    assert!(!repository.is_discovered());
}

#[test]
fn test_unreadable_default_falls_back_to_empty() {
    let repository = StyleRepository::with_sources(
        RepositoryConfig::default(),
        Box::new(MemorySource::new().with("ieee.csl", "<style><info>")),
        Box::new(MemorySource::new()),
    );

    let style = repository.default_style();
    assert_eq!(style, CitationStyle::empty());
    assert_eq!(style.title(), "Empty");
    assert_eq!(style.source(), "");
}

#[test]
fn test_configured_default_style() {
    let dir = corpus();
    let repository = StyleRepository::new(RepositoryConfig {
        styles_dir: Some(dir.path().to_path_buf()),
        default_style: "vancouver.csl".to_string(),
        ..RepositoryConfig::default()
    });

    assert_eq!(repository.default_style().title(), "Vancouver");
}

#[test]
fn test_concurrent_first_discovery() {
    let dir = corpus();
    let repository = Arc::new(StyleRepository::with_sources(
        RepositoryConfig::default(),
        Box::new(DirectorySource::new(dir.path())),
        Box::new(MemorySource::new()),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = Arc::clone(&repository);
            thread::spawn(move || repository.discover_all().as_ptr() as usize)
        })
        .collect();

    let pointers: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(pointers.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(repository.discover_all().len(), 5);
}
