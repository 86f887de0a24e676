//! Trait definitions for the collaborators of option normalisation.
//!
//! These traits abstract the file system and path resolution so that
//! normalisation can be exercised without touching a real disk.

use std::io;
use std::path::{Path, PathBuf};

/// What a `stat` call reports about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    is_file: bool,
    is_dir: bool,
}

impl FileStat {
    /// Stat of a regular file.
    #[must_use]
    pub fn file() -> Self {
        Self {
            is_file: true,
            is_dir: false,
        }
    }

    /// Stat of a directory.
    #[must_use]
    pub fn dir() -> Self {
        Self {
            is_file: false,
            is_dir: true,
        }
    }

    /// Stat of something that is neither (socket, fifo, device).
    #[must_use]
    pub fn other() -> Self {
        Self {
            is_file: false,
            is_dir: false,
        }
    }

    /// Whether the path identifies a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.is_file
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

impl From<&std::fs::Metadata> for FileStat {
    fn from(metadata: &std::fs::Metadata) -> Self {
        Self {
            is_file: metadata.is_file(),
            is_dir: metadata.is_dir(),
        }
    }
}

/// Abstraction for the file system calls made while loading option sources.
///
/// All calls are blocking. The normaliser always calls them in the order
/// `exists` → `stat` → `read_to_string`.
///
/// # Example
///
/// ```rust,ignore
/// use wpt_runner::testing::FileSystem;
///
/// fn load(fs: &impl FileSystem, path: &Path) -> Option<String> {
///     if fs.exists(path) && fs.stat(path).ok()?.is_file() {
///         fs.read_to_string(path).ok()
///     } else {
///         None
///     }
/// }
/// ```
pub trait FileSystem {
    /// Check if a file or directory exists.
    fn exists(&self, path: &Path) -> bool;

    /// Inspect what kind of entry lives at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path vanished or cannot be inspected.
    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Abstraction for turning a candidate path into an absolute one.
///
/// # Example
///
/// ```rust,ignore
/// use wpt_runner::testing::PathResolver;
///
/// let path = resolver.resolve(".wptrc");
/// assert!(path.is_absolute());
/// ```
pub trait PathResolver {
    /// Resolve `candidate` to an absolute path. Never touches the disk.
    fn resolve(&self, candidate: &str) -> PathBuf;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        (**self).stat(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

impl<T: PathResolver + ?Sized> PathResolver for &T {
    fn resolve(&self, candidate: &str) -> PathBuf {
        (**self).resolve(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stat_file() {
        let stat = FileStat::file();
        assert!(stat.is_file());
        assert!(!stat.is_dir());
    }

    #[test]
    fn test_file_stat_dir() {
        let stat = FileStat::dir();
        assert!(!stat.is_file());
        assert!(stat.is_dir());
    }

    #[test]
    fn test_file_stat_other() {
        let stat = FileStat::other();
        assert!(!stat.is_file());
        assert!(!stat.is_dir());
    }

    #[test]
    fn test_file_stat_from_metadata() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("tests.json");
        std::fs::write(&file, "{}").unwrap();

        let stat = FileStat::from(&std::fs::metadata(&file).unwrap());
        assert!(stat.is_file());

        let stat = FileStat::from(&std::fs::metadata(temp.path()).unwrap());
        assert!(stat.is_dir());
    }
}
