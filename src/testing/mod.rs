//! Testing infrastructure for wpt-runner.
//!
//! This module provides the collaborator traits normalisation depends on,
//! mocks that record every call made through them, fixtures and
//! assertions.
//!
//! # Architecture
//!
//! - **Traits**: Abstractions for the file system and path resolution
//! - **Mocks**: Recording test doubles for both traits
//! - **Fixtures**: Temporary working directories with option files (test-only)
//! - **Assertions**: Custom assertions for normalised options
//!
//! # Example
//!
//! ```rust,ignore
//! use wpt_runner::testing::{FsOp, MockFileSystem, MockPathResolver};
//!
//! let fs = MockFileSystem::new().with_file("/mock/.wptrc", r#"{"key":"abc"}"#);
//! let normaliser = Normaliser::new(fs, MockPathResolver::new());
//! normaliser.normalise(&mut options)?;
//! assert_eq!(normaliser.file_system().count(FsOp::Read), 1);
//! ```

pub mod assertions;
#[cfg(test)]
pub mod fixtures;
pub mod mocks;
pub mod traits;

// Re-export commonly used types
pub use assertions::*;
#[cfg(test)]
pub use fixtures::*;
pub use mocks::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use serde_json::json;

    // =========================================================================
    // Fixture Tests (only available in test builds)
    // =========================================================================

    #[test]
    fn test_fixture_empty() {
        let fixture = TestFixture::empty();
        assert!(fixture.path().exists());
        assert!(!fixture.path().join(".wptrc").exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::with_config(r#"{"key":"abc"}"#);
        assert!(fixture.path().join(".wptrc").is_file());
    }

    #[test]
    fn test_fixture_resolver_is_anchored() {
        let fixture = TestFixture::empty();
        assert_eq!(
            fixture.resolver().resolve("tests.json"),
            fixture.path().join("tests.json")
        );
    }

    // =========================================================================
    // Normalising against a real directory
    // =========================================================================

    #[test]
    fn test_sample_project_normalises() {
        let fixture = TestFixture::with_sample_project();
        let mut options = Options::new();
        fixture.normaliser().normalise(&mut options).unwrap();

        assert_normalised(&options);
        assert_eq!(options.location(), Some("London_EC2:Firefox"));
        assert_eq!(options.get("key"), Some(&json!("0123456789abcdef")));
        assert_test_names(&options, &["home", "search", "uri", "key"]);
        assert_eq!(options.runs(), Some(9));
    }

    #[test]
    fn test_empty_directory_normalises_to_defaults() {
        let fixture = TestFixture::empty();
        let mut options = Options::new();
        fixture.normaliser().normalise(&mut options).unwrap();

        assert_normalised(&options);
        assert_defaults(&options);
        assert_key_count(&options, 5);
        assert_test_names(&options, &[]);
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let fixture = TestFixture::with_tests(r#"{"home":"https://example.com/"}"#);
        fixture.create_dir(".wptrc").unwrap();

        let mut options = Options::new();
        fixture.normaliser().normalise(&mut options).unwrap();

        assert_test_names(&options, &["home"]);
        assert_key_count(&options, 5);
    }

    #[test]
    fn test_malformed_config_on_disk() {
        let fixture = TestFixture::with_config("foo");
        let mut options = Options::new();
        let err = fixture.normaliser().normalise(&mut options).unwrap_err();

        assert!(err.to_string().contains(".wptrc"));
        assert!(options.get("normalised").is_none());
    }
}
