//! Error types emitted by the streetsense CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use streetsense_core::GridError;
use streetsense_data::{ClientBuildError, ReportError};
use thiserror::Error;

/// Errors emitted by the streetsense CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// No imagery credential was supplied.
    #[error("missing imagery API key (set --{field}, {env} or {fallback})")]
    MissingCredential {
        field: &'static str,
        env: &'static str,
        fallback: &'static str,
    },
    /// An option has an unusable value.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// The survey region or step cannot produce a grid.
    #[error("invalid survey grid: {0}")]
    Grid(#[from] GridError),
    /// An HTTP client could not be constructed.
    #[error("failed to build {service} client: {source}")]
    BuildClient {
        service: &'static str,
        #[source]
        source: ClientBuildError,
    },
    /// The output directory could not be prepared.
    #[error("failed to prepare output directory {path:?}: {source}")]
    PrepareOutputDir {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Writing or publishing the report failed.
    #[error(transparent)]
    Report(#[from] ReportError),
    /// Writing the command summary failed.
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
