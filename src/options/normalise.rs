//! Settings normalisation.
//!
//! [`Normaliser`] turns whatever the caller supplied into a complete
//! [`Options`] object. Precedence, highest first:
//!
//! 1. values already present on the options object
//! 2. the config file (`.wptrc`, or the path in `config`)
//! 3. the test-definitions file (`tests.json`, or the path in `tests`),
//!    which only feeds the `tests` mapping
//! 4. built-in defaults for `location`, `connection` and `count`
//!
//! Lower layers only ever fill gaps. Once an object has been normalised,
//! normalising it again is a no-op that touches neither collaborator.

use super::sources::{BaseDirResolver, SourceChain, SourceKind, SourceStatus, StdFileSystem};
use super::{defaults, keys, Options, DEFAULT_CONFIG_FILE, DEFAULT_TESTS_FILE};
use crate::error::{Result, WptError};
use crate::testing::{FileSystem, PathResolver};
use serde_json::{Map, Value};
use tracing::debug;

type Definitions = Vec<(String, Value)>;

/// Fills an [`Options`] object from files and defaults.
///
/// # Example
///
/// ```rust,ignore
/// use wpt_runner::{Normaliser, Options};
///
/// let normaliser = Normaliser::from_current_dir()?;
/// let mut options = Options::new();
/// normaliser.normalise(&mut options)?;
/// assert_eq!(options.location(), Some("Dulles:Chrome"));
/// ```
#[derive(Debug, Clone)]
pub struct Normaliser<F = StdFileSystem, R = BaseDirResolver> {
    fs: F,
    resolver: R,
}

impl Normaliser<StdFileSystem, BaseDirResolver> {
    /// Normaliser over the real file system, resolving relative paths
    /// against the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(StdFileSystem, BaseDirResolver::from_current_dir()?))
    }
}

impl<F: FileSystem, R: PathResolver> Normaliser<F, R> {
    pub fn new(fs: F, resolver: R) -> Self {
        Self { fs, resolver }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Normalise `options` in place and hand the same object back.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON in either file, on a file that exists but
    /// cannot be read, and on `config`/`tests` values of the wrong type.
    /// A failed call leaves `options` partially merged and not marked
    /// normalised.
    pub fn normalise<'a>(&self, options: &'a mut Options) -> Result<&'a mut Options> {
        self.normalise_with_sources(options)?;
        Ok(options)
    }

    /// Normalise a dynamically typed options value.
    ///
    /// # Errors
    ///
    /// As [`normalise`](Self::normalise), plus a usage error when `value`
    /// is `null` or not an object.
    pub fn normalise_value(&self, value: Value) -> Result<Options> {
        let mut options = Options::from_value(value)?;
        self.normalise(&mut options)?;
        Ok(options)
    }

    /// Normalise `options` in place, reporting which files were consulted.
    ///
    /// # Errors
    ///
    /// See [`normalise`](Self::normalise).
    pub fn normalise_with_sources(&self, options: &mut Options) -> Result<SourceChain> {
        let mut chain = SourceChain::new();
        if options.is_normalised() {
            debug!("Options already normalised, nothing to load");
            return Ok(chain);
        }

        let config_candidate = match options.get(keys::CONFIG) {
            None => DEFAULT_CONFIG_FILE.to_string(),
            Some(Value::String(path)) => path.clone(),
            Some(_) => {
                return Err(WptError::InvalidField {
                    field: keys::CONFIG,
                    expected: "a file path",
                })
            }
        };
        let mut deferred = Definitions::new();
        if let Some(config) = self.load(SourceKind::Config, &config_candidate, &mut chain)? {
            deferred = merge_config(options, config)?;
        }

        let tests_candidate = match options.get(keys::TESTS) {
            None | Some(Value::Object(_)) => DEFAULT_TESTS_FILE.to_string(),
            Some(Value::String(path)) => path.clone(),
            Some(_) => {
                return Err(WptError::InvalidField {
                    field: keys::TESTS,
                    expected: "a file path or an object",
                })
            }
        };
        let definitions = self
            .load(SourceKind::Tests, &tests_candidate, &mut chain)?
            .unwrap_or_default();
        // Config entries outrank the tests file whether or not its path was named
        let added = options.fill_tests(deferred) + options.fill_tests(definitions);
        debug!(added, "Merged test definitions");

        for (key, value) in defaults() {
            if options.insert_if_absent(key, value) {
                debug!(key, "Applied default");
            }
        }

        options.insert(keys::NORMALISED, true);
        Ok(chain)
    }

    /// Resolve `candidate` and, if it names a regular file, read it as a
    /// JSON object.
    fn load(
        &self,
        kind: SourceKind,
        candidate: &str,
        chain: &mut SourceChain,
    ) -> Result<Option<Map<String, Value>>> {
        let path = self.resolver.resolve(candidate);

        if !self.fs.exists(&path) {
            debug!(source = %kind, path = %path.display(), "Option source not found");
            chain.add_source(kind, path, SourceStatus::Missing);
            return Ok(None);
        }

        let stat = self
            .fs
            .stat(&path)
            .map_err(|e| WptError::read(path.clone(), e))?;
        if !stat.is_file() {
            debug!(source = %kind, path = %path.display(), "Option source is not a regular file");
            chain.add_source(kind, path, SourceStatus::NotAFile);
            return Ok(None);
        }

        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|e| WptError::read(path.clone(), e))?;
        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| WptError::parse(path.clone(), e))?;
        let Value::Object(entries) = parsed else {
            return Err(WptError::NotAnObject { path });
        };

        debug!(
            source = %kind,
            path = %path.display(),
            entries = entries.len(),
            "Loaded option source"
        );
        chain.add_source(kind, path, SourceStatus::Loaded);
        Ok(Some(entries))
    }
}

/// Merge a parsed config file into `options`.
///
/// Keys fill top-level gaps. Non-canonical keys are also mirrored into the
/// `tests` mapping, and a `tests` object in the file contributes its
/// entries there. While `tests` holds anything but a mapping (normally the
/// path of a definitions file) those entries cannot be merged yet, so they
/// are returned for the caller to apply once the file has been read.
///
/// A `tests` value that is neither a path nor a mapping is rejected, as it
/// would be when supplied by the caller.
fn merge_config(options: &mut Options, mut config: Map<String, Value>) -> Result<Definitions> {
    let mut definitions = Definitions::new();
    match config.remove(keys::TESTS) {
        None => {}
        Some(Value::String(path)) => {
            options.insert_if_absent(keys::TESTS, path);
        }
        Some(Value::Object(entries)) => definitions.extend(entries),
        Some(_) => {
            return Err(WptError::InvalidField {
                field: keys::TESTS,
                expected: "a file path or an object",
            })
        }
    }
    for (key, value) in config {
        if !keys::is_canonical(&key) {
            definitions.push((key.clone(), value.clone()));
        }
        options.insert_if_absent(&key, value);
    }

    match options.get(keys::TESTS) {
        None | Some(Value::Object(_)) => {
            if !definitions.is_empty() {
                options.fill_tests(definitions);
            }
            Ok(Definitions::new())
        }
        _ => Ok(definitions),
    }
}
