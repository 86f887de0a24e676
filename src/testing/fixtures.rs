//! Test fixtures for creating reproducible option sources on disk.

use crate::options::{BaseDirResolver, Normaliser, StdFileSystem};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory that may hold `.wptrc` and `tests.json`.
///
/// Automatically cleans up when dropped.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::with_config(r#"{"key":"abc"}"#);
/// let mut options = Options::new();
/// fixture.normaliser().normalise(&mut options).unwrap();
/// ```
pub struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// Create an empty working directory.
    ///
    /// # Panics
    ///
    /// Panics if temporary directory creation fails.
    #[must_use]
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Create a directory holding a `.wptrc` with the given content.
    ///
    /// # Panics
    ///
    /// Panics if file creation fails.
    #[must_use]
    pub fn with_config(content: &str) -> Self {
        let fixture = Self::empty();
        fixture
            .write_file(".wptrc", content)
            .expect("Failed to write .wptrc");
        fixture
    }

    /// Create a directory holding a `tests.json` with the given content.
    ///
    /// # Panics
    ///
    /// Panics if file creation fails.
    #[must_use]
    pub fn with_tests(content: &str) -> Self {
        let fixture = Self::empty();
        fixture
            .write_file("tests.json", content)
            .expect("Failed to write tests.json");
        fixture
    }

    /// Create a directory with both files populated from sample content.
    ///
    /// # Panics
    ///
    /// Panics if file creation fails.
    #[must_use]
    pub fn with_sample_project() -> Self {
        let fixture = Self::with_config(Self::sample_config_content());
        fixture
            .write_file("tests.json", Self::sample_tests_content())
            .expect("Failed to write tests.json");
        fixture
    }

    /// Get the path to the fixture directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path as a PathBuf (owned).
    #[must_use]
    pub fn path_buf(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Resolver anchored at the fixture directory.
    #[must_use]
    pub fn resolver(&self) -> BaseDirResolver {
        BaseDirResolver::new(self.path_buf())
    }

    /// Normaliser over the real file system, anchored at the fixture.
    #[must_use]
    pub fn normaliser(&self) -> Normaliser<StdFileSystem, BaseDirResolver> {
        Normaliser::new(StdFileSystem, self.resolver())
    }

    /// Write a file to the fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_file(&self, relative_path: &str, content: &str) -> std::io::Result<()> {
        let path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    /// Create a subdirectory in the fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, relative_path: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(self.temp_dir.path().join(relative_path))
    }

    fn sample_config_content() -> &'static str {
        r#"{
  "uri": "https://wpt.example.com",
  "key": "0123456789abcdef",
  "location": "London_EC2:Firefox"
}
"#
    }

    fn sample_tests_content() -> &'static str {
        r#"{
  "home": "https://www.example.com/",
  "search": "https://www.example.com/search?q=webpagetest"
}
"#
    }
}
