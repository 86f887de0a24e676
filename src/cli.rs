//! Command-line registration of the option catalog.
//!
//! Flags are not declared with clap's derive API: every [`OptionDescriptor`]
//! in the catalog becomes one [`Arg`], so the catalog stays the single
//! source of truth for what the tool accepts.

use crate::error::{Result, WptError};
use crate::options::{catalog, OptionDescriptor, Options};
use clap::{Arg, ArgAction, ArgMatches, Command};

pub const BIN_NAME: &str = "wpt-runner";

/// Build the clap command for the catalog.
///
/// # Errors
///
/// Returns an error if a catalog entry's format is malformed.
pub fn command() -> Result<Command> {
    let mut command = Command::new(BIN_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run WebPageTest test suites with layered option files")
        .long_about(
            "Run WebPageTest test suites with layered option files.\n\n\
             Flags take precedence over the config file (.wptrc), which takes \
             precedence over built-in defaults. Test definitions are read from \
             tests.json unless --tests names another file.",
        );

    for option in catalog::cli() {
        command = command.arg(arg_for(option)?);
    }
    Ok(command)
}

fn arg_for(option: &'static OptionDescriptor) -> Result<Arg> {
    let flag = option.flag().ok_or_else(|| {
        WptError::Other(anyhow::anyhow!(
            "malformed option format: {}",
            option.format
        ))
    })?;

    Ok(Arg::new(flag.long)
        .short(flag.short)
        .long(flag.long)
        .value_name(flag.value_name)
        .help(option.description)
        .action(ArgAction::Set))
}

/// Collect the flags that were actually supplied into an [`Options`]
/// object, coercing each value through its catalog entry.
///
/// Flags that were not given are left absent so normalisation can fill
/// them.
///
/// # Errors
///
/// Returns [`WptError::Coercion`] when a value is rejected.
pub fn options_from_matches(matches: &ArgMatches) -> Result<Options> {
    let mut options = Options::new();
    for option in catalog::cli() {
        let key = option.key();
        if let Some(raw) = matches.get_one::<String>(key) {
            options.insert(key, option.coerce(raw)?);
        }
    }
    Ok(options)
}

/// Parse an argument list into raw (not yet normalised) options.
///
/// # Errors
///
/// Returns clap's error for unknown flags or missing values, wrapped in
/// [`WptError::Other`], and [`WptError::Coercion`] for rejected values.
pub fn parse_from<I, T>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = command()?
        .try_get_matches_from(args)
        .map_err(|e| WptError::Other(e.into()))?;
    options_from_matches(&matches)
}
