//! CSV report assembly and downstream hand-off.
//!
//! One row per grid location, in grid order, with a fixed column order.
//! Unscored locations keep their row with every score column left empty, so
//! the row count always equals the grid size.

mod summary;

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;
use streetsense_core::{FactorScores, LocationRecord};
use streetsense_fs::{copy_file, create_utf8_file, dir_exists};
use thiserror::Error;

pub use summary::{ColumnStats, ReportSummary};

/// Header row, in output order.
pub const REPORT_COLUMNS: [&str; 10] = [
    "latitude",
    "longitude",
    "overall_discomfort",
    "normalized_discomfort",
    "decay",
    "human_presence",
    "visibility",
    "lighting",
    "maintenance",
    "image_files",
];

/// Prefix of timestamped report names.
///
/// The downstream service scans the analyzer output directory for the newest
/// file with this prefix when no published copy exists.
pub const REPORT_FILE_PREFIX: &str = "seattle_analysis_";

/// File name the downstream service reads from its data directory.
pub const PUBLISHED_REPORT_NAME: &str = "StreetViewScore.csv";

/// Errors raised while writing or publishing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialising the CSV failed.
    #[error("failed to write report {path}: {source}")]
    Csv {
        /// Report path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
    /// Creating, flushing or copying a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Grid point latitude in degrees.
    pub latitude: f64,
    /// Grid point longitude in degrees.
    pub longitude: f64,
    /// Weighted mean of the factors; empty when unscored.
    pub overall_discomfort: Option<f64>,
    /// Overall score rescaled to `0..=1` across the batch.
    pub normalized_discomfort: Option<f64>,
    /// Mean decay factor.
    pub decay: Option<f64>,
    /// Mean human presence factor.
    pub human_presence: Option<f64>,
    /// Mean visibility factor.
    pub visibility: Option<f64>,
    /// Mean lighting factor.
    pub lighting: Option<f64>,
    /// Mean maintenance factor.
    pub maintenance: Option<f64>,
    /// Image identifiers joined with `,`.
    pub image_files: String,
}

impl From<&LocationRecord> for ReportRow {
    fn from(record: &LocationRecord) -> Self {
        let factor = |get: fn(&FactorScores) -> f64| record.factors.as_ref().map(get);
        Self {
            latitude: record.coordinate.latitude(),
            longitude: record.coordinate.longitude(),
            overall_discomfort: record.overall_discomfort,
            normalized_discomfort: record.normalized_discomfort,
            decay: factor(FactorScores::decay),
            human_presence: factor(FactorScores::human_presence),
            visibility: factor(FactorScores::visibility),
            lighting: factor(FactorScores::lighting),
            maintenance: factor(FactorScores::maintenance),
            image_files: record.image_ids.join(","),
        }
    }
}

/// Write `records` as CSV to `writer`, header first.
///
/// # Errors
///
/// Returns [`csv::Error`] when serialisation or the writer fails.
pub fn write_report<W: Write>(writer: W, records: &[LocationRecord]) -> Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(REPORT_COLUMNS)?;
    for record in records {
        csv.serialize(ReportRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `records` to the file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ReportError`] when the file cannot be created or written.
pub fn write_report_file(path: &Utf8Path, records: &[LocationRecord]) -> Result<(), ReportError> {
    let file = create_utf8_file(path).map_err(|source| ReportError::Io {
        path: path.to_owned(),
        source,
    })?;
    write_report(std::io::BufWriter::new(file), records).map_err(|source| ReportError::Csv {
        path: path.to_owned(),
        source,
    })?;
    info!("wrote {} locations to {path}", records.len());
    Ok(())
}

/// Timestamped report name, `seattle_analysis_YYYYmmdd_HHMMSS.csv`.
#[must_use]
pub fn report_file_name(timestamp: NaiveDateTime) -> String {
    format!(
        "{REPORT_FILE_PREFIX}{}.csv",
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Copy `report` into `data_dir` as [`PUBLISHED_REPORT_NAME`].
///
/// Returns the published path, or `None` when `data_dir` does not exist.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the copy fails.
pub fn publish_report(
    report: &Utf8Path,
    data_dir: &Utf8Path,
) -> Result<Option<Utf8PathBuf>, ReportError> {
    if !dir_exists(data_dir) {
        info!("{data_dir} does not exist; skipping report hand-off");
        return Ok(None);
    }
    let target = data_dir.join(PUBLISHED_REPORT_NAME);
    copy_file(report, &target).map_err(|source| ReportError::Io {
        path: target.clone(),
        source,
    })?;
    info!("published report to {target}");
    Ok(Some(target))
}
