//! wpt-runner - WebPageTest runner
//!
//! Parses the catalog flags, normalises them against `.wptrc`,
//! `tests.json` and the built-in defaults, and writes the resulting
//! settings as JSON.

use colored::Colorize;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wpt_runner::{cli, Normaliser, Options, WptError};

fn main() {
    // Logs go to stderr; stdout is reserved for the settings document
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wpt_runner=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<(), WptError> {
    let matches = cli::command()?.get_matches();
    let mut options = cli::options_from_matches(&matches)?;

    let normaliser = Normaliser::from_current_dir()?;
    let sources = normaliser.normalise_with_sources(&mut options)?;
    debug!("{}", sources.describe());

    write_settings(&options)
}

fn write_settings(options: &Options) -> Result<(), WptError> {
    let rendered = serde_json::to_string_pretty(options)?;

    match options.get("output").and_then(|v| v.as_str()) {
        Some(path) => {
            std::fs::write(Path::new(path), format!("{rendered}\n"))
                .map_err(|source| WptError::Write {
                    path: path.into(),
                    source,
                })?;
            info!(path, "Wrote normalised options");
            println!("{} {}", "Wrote".green().bold(), path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
