//! wpt-runner - WebPageTest test runner
//!
//! Normalises the settings of a WebPageTest run. Command-line flags are
//! layered over a JSON config file (`.wptrc` by default), test definitions
//! are read from a JSON tests file (`tests.json` by default), and built-in
//! defaults fill whatever is still missing.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Registers the option catalog as command-line flags
//! - [`error`] - Custom error types and handling
//! - [`options`] - Option catalog, normalisation and source tracking
//! - [`testing`] - Testing infrastructure (traits, mocks, fixtures)
//!
//! # Example
//!
//! ```rust,ignore
//! use wpt_runner::{Normaliser, Options};
//!
//! let mut options = Options::new();
//! options.insert("location", "London_EC2:Firefox");
//!
//! let normaliser = Normaliser::from_current_dir()?;
//! normaliser.normalise(&mut options)?;
//! assert!(options.is_normalised());
//! ```

pub mod cli;
pub mod error;
pub mod options;
pub mod testing;

// Re-export commonly used types
pub use error::{Result, WptError};

// Re-export option types
pub use options::{
    Normaliser, OptionDescriptor, OptionSource, Options, SourceChain, SourceKind, SourceStatus,
};

// Re-export testing types for convenience
pub use testing::{
    FileStat, FileSystem, FsCall, FsOp, MockFileSystem, MockPathResolver, PathResolver,
};
