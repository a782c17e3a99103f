//! Analyse command implementation for the streetsense CLI.

use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use streetsense_core::{BoundingRegion, grid};
use streetsense_data::{
    DEFAULT_STREETVIEW_URL, DirectoryImageSink, HttpDetector, HttpDetectorConfig, ReportSummary,
    StreetViewClient, StreetViewConfig, publish_report, report_file_name, write_report_file,
};
use streetsense_survey::{DEFAULT_CONCURRENCY, Survey, SurveyConfig, SurveySummary};
use streetsense_vision::{HeuristicScorer, ImageNetPreprocessor};

use crate::{
    ARG_API_KEY, ARG_CONCURRENCY, ARG_DETECTOR_URL, ARG_LAT_MAX, ARG_LAT_MIN, ARG_LON_MAX,
    ARG_LON_MIN, ARG_OUTPUT_DIR, ARG_PUBLISH_DIR, ARG_STEP, ARG_STREETVIEW_URL, ARG_TIMEOUT_SECS,
    CliError, ENV_API_KEY, ENV_DETECTOR_URL, ENV_FALLBACK_API_KEY,
};

const DEFAULT_STEP: f64 = 0.005;
const DEFAULT_OUTPUT_DIR: &str = "outputs";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI arguments for the `analyse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Survey a rectangular region on a regular grid. Each grid \
                 point is photographed in four directions, every image is \
                 scored for decay, human presence, visibility, lighting and \
                 maintenance, and the per-location results are normalized \
                 across the batch and written to a CSV report.",
    about = "Survey a region and write a discomfort report"
)]
#[ortho_config(prefix = "STREETSENSE")]
pub(crate) struct AnalyseArgs {
    /// Southern edge of the region in degrees.
    #[arg(long = ARG_LAT_MIN, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat_min: Option<f64>,
    /// Northern edge of the region in degrees.
    #[arg(long = ARG_LAT_MAX, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat_max: Option<f64>,
    /// Western edge of the region in degrees.
    #[arg(long = ARG_LON_MIN, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon_min: Option<f64>,
    /// Eastern edge of the region in degrees.
    #[arg(long = ARG_LON_MAX, value_name = "deg", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon_max: Option<f64>,
    /// Grid spacing in degrees (default 0.005).
    #[arg(long = ARG_STEP, value_name = "deg")]
    #[serde(default)]
    pub(crate) step: Option<f64>,
    /// Street View Static API key.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Override the imagery endpoint.
    #[arg(long = ARG_STREETVIEW_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) streetview_url: Option<String>,
    /// Object detection endpoint receiving JPEG uploads.
    #[arg(long = ARG_DETECTOR_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) detector_url: Option<String>,
    /// Directory receiving the report and captured images (default "outputs").
    #[arg(long = ARG_OUTPUT_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Downstream data directory receiving a copy of the report.
    ///
    /// Without it the report stays under the output directory, where the
    /// downstream service finds it by its `seattle_analysis_` prefix.
    #[arg(long = ARG_PUBLISH_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) publish_dir: Option<Utf8PathBuf>,
    /// Locations surveyed concurrently (default 4).
    #[arg(long = ARG_CONCURRENCY, value_name = "n")]
    #[serde(default)]
    pub(crate) concurrency: Option<usize>,
    /// Per-request timeout in seconds (default 30).
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl AnalyseArgs {
    pub(crate) fn into_config(self) -> Result<AnalyseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyseConfig::try_from(merged.with_fallback_key(|name| std::env::var(name).ok()))
    }

    /// Fill a missing API key from the fallback variable, read via `lookup`.
    pub(crate) fn with_fallback_key(
        mut self,
        lookup: impl FnOnce(&str) -> Option<String>,
    ) -> Self {
        if self.api_key.is_none() {
            self.api_key = lookup(ENV_FALLBACK_API_KEY);
        }
        self
    }
}

/// Resolved `analyse` command configuration.
#[derive(Clone, PartialEq)]
pub(crate) struct AnalyseConfig {
    pub(crate) region: BoundingRegion,
    pub(crate) step: f64,
    pub(crate) api_key: String,
    pub(crate) streetview_url: String,
    pub(crate) detector_url: String,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) publish_dir: Option<Utf8PathBuf>,
    pub(crate) concurrency: NonZeroUsize,
    pub(crate) timeout: Duration,
}

impl std::fmt::Debug for AnalyseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyseConfig")
            .field("region", &self.region)
            .field("step", &self.step)
            .field("api_key", &"<redacted>")
            .field("streetview_url", &self.streetview_url)
            .field("detector_url", &self.detector_url)
            .field("output_dir", &self.output_dir)
            .field("publish_dir", &self.publish_dir)
            .field("concurrency", &self.concurrency)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TryFrom<AnalyseArgs> for AnalyseConfig {
    type Error = CliError;

    fn try_from(args: AnalyseArgs) -> Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingCredential {
                field: ARG_API_KEY,
                env: ENV_API_KEY,
                fallback: ENV_FALLBACK_API_KEY,
            })?;
        let detector_url = args.detector_url.ok_or(CliError::MissingArgument {
            field: ARG_DETECTOR_URL,
            env: ENV_DETECTOR_URL,
        })?;

        let seattle = BoundingRegion::SEATTLE;
        let region = BoundingRegion::new(
            args.lat_min.unwrap_or(seattle.lat_min),
            args.lat_max.unwrap_or(seattle.lat_max),
            args.lon_min.unwrap_or(seattle.lon_min),
            args.lon_max.unwrap_or(seattle.lon_max),
        );
        let concurrency = match args.concurrency {
            None => DEFAULT_CONCURRENCY,
            Some(n) => NonZeroUsize::new(n).ok_or_else(|| CliError::InvalidArgument {
                field: ARG_CONCURRENCY,
                reason: "must be at least 1".to_owned(),
            })?,
        };
        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_TIMEOUT_SECS,
                reason: "must be at least 1 second".to_owned(),
            });
        }

        Ok(Self {
            region,
            step: args.step.unwrap_or(DEFAULT_STEP),
            api_key,
            streetview_url: args
                .streetview_url
                .unwrap_or_else(|| DEFAULT_STREETVIEW_URL.to_owned()),
            detector_url,
            output_dir: args
                .output_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT_DIR)),
            publish_dir: args.publish_dir,
            concurrency,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Builds the survey pipeline for the current invocation.
pub(crate) trait SurveyBuilder {
    fn build(&self, config: &AnalyseConfig) -> Result<Survey, CliError>;
}

pub(crate) struct DefaultSurveyBuilder;

impl SurveyBuilder for DefaultSurveyBuilder {
    fn build(&self, config: &AnalyseConfig) -> Result<Survey, CliError> {
        let imagery = StreetViewClient::with_config(
            StreetViewConfig::new(config.api_key.clone())
                .with_base_url(config.streetview_url.clone())
                .with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildClient {
            service: "imagery",
            source,
        })?;
        let detector = HttpDetector::with_config(
            HttpDetectorConfig::new(config.detector_url.clone()).with_timeout(config.timeout),
        )
        .map_err(|source| CliError::BuildClient {
            service: "detection",
            source,
        })?;
        let sink = prepare_sink(&config.output_dir)?;
        Ok(Survey::new(
            Arc::new(imagery),
            Arc::new(detector),
            Arc::new(ImageNetPreprocessor::default()),
            Arc::new(HeuristicScorer),
        )
        .with_sink(Arc::new(sink))
        .with_config(SurveyConfig::default().with_concurrency(config.concurrency)))
    }
}

pub(crate) fn prepare_sink(output_dir: &Utf8Path) -> Result<DirectoryImageSink, CliError> {
    DirectoryImageSink::create(output_dir).map_err(|source| CliError::PrepareOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// What a finished `analyse` run produced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnalyseOutcome {
    pub(crate) report_path: Utf8PathBuf,
    pub(crate) published: Option<Utf8PathBuf>,
    pub(crate) summary: SurveySummary,
}

pub(super) fn run_analyse(args: AnalyseArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_analyse_with(args, &DefaultSurveyBuilder, &mut stdout)
}

pub(super) fn run_analyse_with(
    args: AnalyseArgs,
    builder: &dyn SurveyBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let outcome = execute_analyse(&config, builder, Local::now().naive_local())?;
    let summary = outcome.summary;
    writeln!(
        writer,
        "{} ({} of {} locations scored)",
        outcome.report_path, summary.scored, summary.locations
    )
    .map_err(CliError::WriteOutput)?;
    if let Some(published) = &outcome.published {
        writeln!(writer, "published {published}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

/// Validate the grid, run the survey, then export and publish the report.
///
/// Every configuration problem surfaces before the first location is
/// surveyed.
pub(crate) fn execute_analyse(
    config: &AnalyseConfig,
    builder: &dyn SurveyBuilder,
    started: NaiveDateTime,
) -> Result<AnalyseOutcome, CliError> {
    let points = grid(config.region, config.step)?;
    info!(
        "grid of {} locations ({} x {}) at step {}",
        points.point_count(),
        points.rows(),
        points.columns(),
        config.step
    );
    let survey = builder.build(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let report = runtime.block_on(survey.run(points));

    let report_path = config.output_dir.join(report_file_name(started));
    write_report_file(&report_path, &report.records)?;
    ReportSummary::from_records(&report.records).log();
    let published = match &config.publish_dir {
        Some(dir) => publish_report(&report_path, dir)?,
        None => None,
    };
    Ok(AnalyseOutcome {
        report_path,
        published,
        summary: report.summary,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
    env: &[(&str, &str)],
) -> Result<AnalyseConfig, CliError> {
    let merged = AnalyseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AnalyseConfig::try_from(merged.with_fallback_key(|name| {
        env.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_owned())
    }))
}
