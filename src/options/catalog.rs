//! The command-line options wpt-runner recognises.
//!
//! The catalog is plain data: each entry names a flag, its help text and,
//! optionally, how to turn the raw argument into a typed value. Whatever
//! parses the command line iterates [`cli`] to register the flags.

use crate::error::{Result, WptError};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Converts a raw flag argument into a typed value, or explains why not.
pub type Coercion = fn(&str) -> std::result::Result<Value, String>;

/// One recognised command-line option.
#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    /// Flag syntax, e.g. `-l, --location <location>`.
    pub format: &'static str,
    /// Help text.
    pub description: &'static str,
    pub coercion: Option<Coercion>,
}

/// The pieces of an option's `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagParts {
    pub short: char,
    pub long: &'static str,
    pub value_name: &'static str,
}

static CLI: [OptionDescriptor; 10] = [
    OptionDescriptor {
        format: "-c, --config <path>",
        description: "read configuration from a JSON file, defaults to `.wptrc`",
        coercion: None,
    },
    OptionDescriptor {
        format: "-u, --uri <uri>",
        description: "base URI of the WebPageTest instance",
        coercion: Some(coerce_uri),
    },
    OptionDescriptor {
        format: "-k, --key <key>",
        description: "secret API key for the WebPageTest instance",
        coercion: None,
    },
    OptionDescriptor {
        format: "-l, --location <location>",
        description: "location to run tests from, defaults to `Dulles:Chrome`",
        coercion: None,
    },
    OptionDescriptor {
        format: "-y, --connection <connection>",
        description: "connection type to run tests over, defaults to `Native Connection`",
        coercion: None,
    },
    OptionDescriptor {
        format: "-t, --tests <path>",
        description: "read test definitions from a JSON file, defaults to `tests.json`",
        coercion: None,
    },
    OptionDescriptor {
        format: "-n, --count <number>",
        description: "number of times to run each test, defaults to `9`",
        coercion: Some(coerce_count),
    },
    OptionDescriptor {
        format: "-e, --email <addresses>",
        description: "email addresses to notify on completion, comma separated",
        coercion: Some(coerce_addresses),
    },
    OptionDescriptor {
        format: "-w, --wait <seconds>",
        description: "seconds to wait between polls for results",
        coercion: Some(coerce_seconds),
    },
    OptionDescriptor {
        format: "-o, --output <path>",
        description: "write the normalised options to a JSON file, defaults to stdout",
        coercion: None,
    },
];

/// All recognised options, in registration order.
pub fn cli() -> &'static [OptionDescriptor] {
    &CLI
}

fn format_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-([a-z]), --([a-z]+) <([a-z]+)>$").expect("flag format pattern is valid")
    })
}

impl OptionDescriptor {
    /// Split `format` into short flag, long flag and value placeholder.
    ///
    /// Returns `None` when `format` does not have the
    /// `-x, --long <value>` shape.
    pub fn flag(&self) -> Option<FlagParts> {
        let caps = format_pattern().captures(self.format)?;
        Some(FlagParts {
            short: caps.get(1)?.as_str().chars().next()?,
            long: caps.get(2)?.as_str(),
            value_name: caps.get(3)?.as_str(),
        })
    }

    /// Name the option is stored under in [`Options`](super::Options).
    pub fn key(&self) -> &'static str {
        self.flag().map_or(self.format, |flag| flag.long)
    }

    /// Apply the coercion to a raw argument. Options without a coercion
    /// keep the argument as a string.
    ///
    /// # Errors
    ///
    /// Returns [`WptError::Coercion`] when the coercion rejects `raw`.
    pub fn coerce(&self, raw: &str) -> Result<Value> {
        match self.coercion {
            Some(coercion) => {
                coercion(raw).map_err(|reason| WptError::coercion(self.key(), raw, reason))
            }
            None => Ok(Value::String(raw.to_string())),
        }
    }
}

// ============================================================================
// Coercions
// ============================================================================

fn coerce_uri(raw: &str) -> std::result::Result<Value, String> {
    let uri = raw.trim().trim_end_matches('/');
    if uri.is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(Value::from(uri))
}

fn coerce_count(raw: &str) -> std::result::Result<Value, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(count) => Ok(Value::from(count)),
        Err(_) => Err("must be a positive integer".to_string()),
    }
}

fn coerce_addresses(raw: &str) -> std::result::Result<Value, String> {
    let addresses: Vec<Value> = raw
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(Value::from)
        .collect();
    if addresses.is_empty() {
        return Err("expected at least one address".to_string());
    }
    Ok(Value::Array(addresses))
}

fn coerce_seconds(raw: &str) -> std::result::Result<Value, String> {
    raw.trim()
        .parse::<u64>()
        .map(Value::from)
        .map_err(|_| "must be a whole number of seconds".to_string())
}
