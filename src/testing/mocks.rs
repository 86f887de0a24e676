//! Mock implementations of the collaborator traits.
//!
//! Both mocks record every call they receive so tests can assert on the
//! exact sequence of file system traffic a normalisation produced.

use super::traits::{FileStat, FileSystem, PathResolver};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// A file system operation observed by [`MockFileSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsOp {
    Exists,
    Stat,
    Read,
}

/// One recorded call on [`MockFileSystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsCall {
    pub op: FsOp,
    pub path: PathBuf,
}

/// Mock implementation of file system operations.
///
/// Uses an in-memory HashMap to simulate file storage.
///
/// # Example
///
/// ```rust,ignore
/// let fs = MockFileSystem::new().with_file("/work/.wptrc", r#"{"key":"abc"}"#);
/// assert!(fs.exists(Path::new("/work/.wptrc")));
/// assert_eq!(fs.count(FsOp::Exists), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: HashMap<PathBuf, String>,
    directories: Vec<PathBuf>,
    read_error: Option<String>,
    calls: RefCell<Vec<FsCall>>,
}

impl MockFileSystem {
    /// Create a new empty mock file system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with files.
    #[must_use]
    pub fn with_files(mut self, files: HashMap<PathBuf, String>) -> Self {
        self.files = files;
        self
    }

    /// Add a single file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.directories.push(path.into());
        self
    }

    /// Configure every read to fail with an error.
    #[must_use]
    pub fn with_read_error(mut self, error: &str) -> Self {
        self.read_error = Some(error.to_string());
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls received for one operation.
    pub fn count(&self, op: FsOp) -> usize {
        self.calls.borrow().iter().filter(|c| c.op == op).count()
    }

    /// Paths passed to one operation, in order.
    pub fn paths(&self, op: FsOp) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.op == op)
            .map(|c| c.path.clone())
            .collect()
    }

    fn record(&self, op: FsOp, path: &Path) {
        self.calls.borrow_mut().push(FsCall {
            op,
            path: path.to_path_buf(),
        });
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.iter().any(|d| d == path)
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.record(FsOp::Exists, path);
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        self.record(FsOp::Stat, path);
        if self.files.contains_key(path) {
            Ok(FileStat::file())
        } else if self.is_dir(path) {
            Ok(FileStat::dir())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            ))
        }
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.record(FsOp::Read, path);
        if let Some(ref error) = self.read_error {
            return Err(io::Error::other(error.clone()));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No such file: {}", path.display()),
            )
        })
    }
}

/// Mock implementation of path resolution.
///
/// Joins candidates onto a fake root unless configured to resolve
/// everything to one fixed path.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = MockPathResolver::new().with_resolved("wibble");
/// assert_eq!(resolver.resolve(".wptrc"), PathBuf::from("wibble"));
/// assert_eq!(resolver.candidates(), vec![".wptrc"]);
/// ```
#[derive(Debug, Clone)]
pub struct MockPathResolver {
    root: PathBuf,
    fixed: Option<PathBuf>,
    candidates: RefCell<Vec<String>>,
}

impl Default for MockPathResolver {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/mock"),
            fixed: None,
            candidates: RefCell::new(Vec::new()),
        }
    }
}

impl MockPathResolver {
    /// Create a resolver rooted at `/mock`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root that candidates are joined onto.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolve every candidate to the same path.
    #[must_use]
    pub fn with_resolved(mut self, path: impl Into<PathBuf>) -> Self {
        self.fixed = Some(path.into());
        self
    }

    /// Candidates received so far, in order.
    pub fn candidates(&self) -> Vec<String> {
        self.candidates.borrow().clone()
    }

    /// Get the number of times resolve was called.
    pub fn call_count(&self) -> usize {
        self.candidates.borrow().len()
    }
}

impl PathResolver for MockPathResolver {
    fn resolve(&self, candidate: &str) -> PathBuf {
        self.candidates.borrow_mut().push(candidate.to_string());
        match self.fixed {
            Some(ref path) => path.clone(),
            None => self.root.join(candidate),
        }
    }
}
