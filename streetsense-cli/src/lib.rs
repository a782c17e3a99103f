//! Command-line interface for streetsense location surveys.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod analyse;
mod error;

pub use error::CliError;

pub(crate) const ARG_LAT_MIN: &str = "lat-min";
pub(crate) const ARG_LAT_MAX: &str = "lat-max";
pub(crate) const ARG_LON_MIN: &str = "lon-min";
pub(crate) const ARG_LON_MAX: &str = "lon-max";
pub(crate) const ARG_STEP: &str = "step";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_STREETVIEW_URL: &str = "streetview-url";
pub(crate) const ARG_DETECTOR_URL: &str = "detector-url";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_PUBLISH_DIR: &str = "publish-dir";
pub(crate) const ARG_CONCURRENCY: &str = "concurrency";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ENV_API_KEY: &str = "STREETSENSE_CMDS_ANALYSE_API_KEY";
pub(crate) const ENV_DETECTOR_URL: &str = "STREETSENSE_CMDS_ANALYSE_DETECTOR_URL";
/// Conventional variable holding the imagery key, read when nothing else
/// supplies one.
pub(crate) const ENV_FALLBACK_API_KEY: &str = "GOOGLE_MAPS_API_KEY";

/// Run the streetsense CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments are invalid, configuration is
/// incomplete, or the report cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Analyse(args) => analyse::run_analyse(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "streetsense",
    about = "Score street-level discomfort across a geographic grid",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Survey a region and write a per-location discomfort report.
    Analyse(analyse::AnalyseArgs),
}

#[cfg(test)]
mod tests;
