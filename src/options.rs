//! Settings for a wpt-runner invocation.
//!
//! [`Options`] is the single settings object handed around the tool. It
//! starts life as whatever the caller supplied (usually parsed flags),
//! and [`Normaliser`] fills in the config file, the test definitions and
//! the built-in defaults.

pub mod catalog;
pub mod normalise;
pub mod sources;

pub use catalog::{cli, Coercion, FlagParts, OptionDescriptor};
pub use normalise::Normaliser;
pub use sources::{
    BaseDirResolver, OptionSource, SourceChain, SourceKind, SourceStatus, StdFileSystem,
};

use crate::error::{Result, WptError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Config file consulted when the caller does not name one.
pub const DEFAULT_CONFIG_FILE: &str = ".wptrc";

/// Test-definitions file consulted when the caller does not name one.
pub const DEFAULT_TESTS_FILE: &str = "tests.json";

pub const DEFAULT_LOCATION: &str = "Dulles:Chrome";

pub const DEFAULT_CONNECTION: &str = "Native Connection";

/// Default number of runs per test.
///
/// This is a literal, not the size of `tests`.
pub const DEFAULT_COUNT: u64 = 9;

/// Names of the canonical settings.
pub mod keys {
    pub const CONFIG: &str = "config";
    pub const LOCATION: &str = "location";
    pub const CONNECTION: &str = "connection";
    pub const TESTS: &str = "tests";
    pub const COUNT: &str = "count";
    pub const NORMALISED: &str = "normalised";

    /// All canonical setting names.
    pub const CANONICAL: &[&str] = &[CONFIG, LOCATION, CONNECTION, TESTS, COUNT, NORMALISED];

    /// Whether `key` names a canonical setting.
    pub fn is_canonical(key: &str) -> bool {
        CANONICAL.contains(&key)
    }
}

/// Defaults applied to top-level settings that are absent after the
/// config file has been merged.
pub fn defaults() -> [(&'static str, Value); 3] {
    [
        (keys::LOCATION, Value::from(DEFAULT_LOCATION)),
        (keys::CONNECTION, Value::from(DEFAULT_CONNECTION)),
        (keys::COUNT, Value::from(DEFAULT_COUNT)),
    ]
}

/// Describe a JSON value's type for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// An open mapping from setting name to value.
///
/// Canonical settings have typed accessors; everything else passes
/// through untouched. Values are kept as JSON so that a caller-supplied
/// `count` of `"qux"` survives normalisation exactly as given.
///
/// # Example
///
/// ```rust
/// use wpt_runner::Options;
/// use serde_json::json;
///
/// let options = Options::from_value(json!({ "location": "London_EC2:Firefox" })).unwrap();
/// assert_eq!(options.location(), Some("London_EC2:Firefox"));
/// assert!(!options.is_normalised());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: Map<String, Value>,
}

impl Options {
    /// Create an empty options object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a dynamically typed options value.
    ///
    /// # Errors
    ///
    /// Returns [`WptError::MissingOptions`] for `null` and
    /// [`WptError::InvalidOptions`] for anything that is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            Value::Null => Err(WptError::MissingOptions),
            other => Err(WptError::InvalidOptions {
                found: json_type_name(&other),
            }),
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Set a value only if the key is absent. Returns whether it was set.
    pub fn insert_if_absent(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), value.into());
        true
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Canonical accessors
    // =========================================================================

    /// Explicit config file path, if one was given.
    pub fn config(&self) -> Option<&str> {
        self.get(keys::CONFIG).and_then(Value::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.get(keys::LOCATION).and_then(Value::as_str)
    }

    pub fn connection(&self) -> Option<&str> {
        self.get(keys::CONNECTION).and_then(Value::as_str)
    }

    /// Test definitions, once `tests` holds a mapping.
    pub fn tests(&self) -> Option<&Map<String, Value>> {
        self.get(keys::TESTS).and_then(Value::as_object)
    }

    /// Test-definitions file path, while `tests` still holds one.
    pub fn tests_path(&self) -> Option<&str> {
        self.get(keys::TESTS).and_then(Value::as_str)
    }

    /// Raw `count`, whatever type the caller gave it.
    pub fn count(&self) -> Option<&Value> {
        self.get(keys::COUNT)
    }

    /// `count` as a run count, when it is a non-negative integer.
    pub fn runs(&self) -> Option<u64> {
        self.count().and_then(Value::as_u64)
    }

    pub fn is_normalised(&self) -> bool {
        self.get(keys::NORMALISED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Add test definitions that are not already present, turning `tests`
    /// into a mapping first if it held anything else. Returns how many
    /// entries were added.
    pub fn fill_tests<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut tests = match self.entries.remove(keys::TESTS) {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let mut added = 0;
        for (name, definition) in entries {
            if !tests.contains_key(&name) {
                tests.insert(name, definition);
                added += 1;
            }
        }
        self.entries.insert(keys::TESTS.to_string(), Value::Object(tests));
        added
    }
}

impl From<Map<String, Value>> for Options {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl TryFrom<Value> for Options {
    type Error = WptError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<Options> for Value {
    fn from(options: Options) -> Self {
        options.into_value()
    }
}
