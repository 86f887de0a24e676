//! Where option files come from.
//!
//! This module holds the production implementations of the collaborator
//! traits, plus [`SourceChain`], a record of which files a normalisation
//! consulted and what happened to each.
//!
//! # Sources
//!
//! Two files are consulted, in order:
//!
//! 1. **Config** - general settings (`.wptrc` unless `config` names another)
//! 2. **Tests** - test definitions (`tests.json` unless `tests` names another)
//!
//! Both are optional. A missing file is recorded, not reported.

use crate::testing::{FileStat, FileSystem, PathResolver};
use std::io;
use std::path::{Path, PathBuf};

// ============================================================================
// Std implementations
// ============================================================================

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        std::fs::metadata(path).map(|metadata| FileStat::from(&metadata))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// [`PathResolver`] that anchors relative candidates to a base directory.
///
/// Absolute candidates are returned as given.
#[derive(Debug, Clone)]
pub struct BaseDirResolver {
    base: PathBuf,
}

impl BaseDirResolver {
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolve against the process working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is gone or unreadable.
    pub fn from_current_dir() -> io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl PathResolver for BaseDirResolver {
    fn resolve(&self, candidate: &str) -> PathBuf {
        // join() keeps absolute candidates as they are
        self.base.join(candidate)
    }
}

// ============================================================================
// Source chain
// ============================================================================

/// Which file a source entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// General settings file (`.wptrc`).
    Config,
    /// Test-definitions file (`tests.json`).
    Tests,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Tests => write!(f, "tests"),
        }
    }
}

/// What happened when a source was consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// Read, parsed and merged.
    Loaded,
    /// Nothing exists at the resolved path.
    Missing,
    /// Something exists at the resolved path but it is not a regular file.
    NotAFile,
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Missing => write!(f, "missing"),
            Self::NotAFile => write!(f, "not a file"),
        }
    }
}

/// One consulted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSource {
    pub kind: SourceKind,
    /// Resolved path.
    pub path: PathBuf,
    pub status: SourceStatus,
}

/// The sources a normalisation consulted, in order.
///
/// Empty when the options were already normalised.
///
/// # Example
///
/// ```rust
/// use wpt_runner::options::{SourceChain, SourceKind, SourceStatus};
/// use std::path::PathBuf;
///
/// let mut chain = SourceChain::new();
/// chain.add_source(SourceKind::Config, PathBuf::from("/work/.wptrc"), SourceStatus::Loaded);
/// chain.add_source(SourceKind::Tests, PathBuf::from("/work/tests.json"), SourceStatus::Missing);
///
/// assert_eq!(chain.loaded_count(), 1);
/// println!("{}", chain.describe());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceChain {
    pub sources: Vec<OptionSource>,
}

impl SourceChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, kind: SourceKind, path: PathBuf, status: SourceStatus) {
        self.sources.push(OptionSource { kind, path, status });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Get the number of successfully loaded sources.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.status == SourceStatus::Loaded)
            .count()
    }

    /// The entry for one kind of source, if it was consulted.
    #[must_use]
    pub fn get(&self, kind: SourceKind) -> Option<&OptionSource> {
        self.sources.iter().find(|s| s.kind == kind)
    }

    /// Get a formatted description of the chain for logging.
    ///
    /// Loaded sources are marked `+`, everything else `-`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.sources.is_empty() {
            return "Option sources: none consulted (already normalised)".to_string();
        }
        let mut lines = vec!["Option sources:".to_string()];
        for source in &self.sources {
            let marker = if source.status == SourceStatus::Loaded {
                "+"
            } else {
                "-"
            };
            lines.push(format!(
                "  {} [{}] {} ({})",
                marker,
                source.kind,
                source.path.display(),
                source.status
            ));
        }
        lines.join("\n")
    }
}
