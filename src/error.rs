//! Custom error types for wpt-runner.
//!
//! Every failure in option handling surfaces as a [`WptError`] so the
//! binary can map it onto a stable exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for option normalisation
#[derive(Error, Debug)]
pub enum WptError {
    // =========================================================================
    // Usage Errors
    // =========================================================================
    /// `normalise` was handed nothing to work on
    #[error("Options are required: expected a JSON object, found nothing")]
    MissingOptions,

    /// The options value was not a JSON object
    #[error("Invalid options: expected a JSON object, found {found}")]
    InvalidOptions { found: &'static str },

    /// A canonical field holds a value of the wrong type
    #[error("Invalid option `{field}`: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A command-line value was rejected by its coercion
    #[error("Invalid value '{value}' for --{flag}: {reason}")]
    Coercion {
        flag: String,
        value: String,
        reason: String,
    },

    // =========================================================================
    // Source Errors
    // =========================================================================
    /// File content is not valid JSON
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File content is valid JSON but not an object
    #[error("Expected a JSON object in {}", path.display())]
    NotAnObject { path: PathBuf },

    /// File exists but could not be inspected or read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WptError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a parse error for a source file
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create a read error for a source file
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a coercion error for a command-line flag
    pub fn coercion(
        flag: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            flag: flag.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error was caused by how the caller invoked us
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::MissingOptions
                | Self::InvalidOptions { .. }
                | Self::InvalidField { .. }
                | Self::Coercion { .. }
        )
    }

    /// Check if this error came from the content of a source file
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NotAnObject { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            _ if self.is_usage_error() => 2,
            Self::Read { .. } | Self::Write { .. } | Self::Io(_) => 6,
            _ if self.is_source_error() => 7,
            _ => 1,
        }
    }
}

/// Type alias for wpt-runner results
pub type Result<T> = std::result::Result<T, WptError>;
