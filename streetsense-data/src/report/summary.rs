//! Batch statistics logged after export.

use log::info;
use streetsense_core::LocationRecord;

/// Count, mean and range of one report column over its non-empty cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    /// Non-empty cells.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl ColumnStats {
    /// Statistics of `values`, or `None` when there are none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0_usize;
        let mut mean = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values {
            count += 1;
            mean += (value - mean) / count as f64;
            min = min.min(value);
            max = max.max(value);
        }
        (count > 0).then_some(Self {
            count,
            mean,
            min,
            max,
        })
    }
}

/// Summary of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportSummary {
    /// Rows in the report.
    pub locations: usize,
    /// Statistics of `overall_discomfort`.
    pub overall: Option<ColumnStats>,
    /// Statistics of `normalized_discomfort`.
    pub normalized: Option<ColumnStats>,
}

impl ReportSummary {
    /// Summarise `records`.
    #[must_use]
    pub fn from_records(records: &[LocationRecord]) -> Self {
        Self {
            locations: records.len(),
            overall: ColumnStats::from_values(records.iter().filter_map(|r| r.overall_discomfort)),
            normalized: ColumnStats::from_values(
                records.iter().filter_map(|r| r.normalized_discomfort),
            ),
        }
    }

    /// Write the summary to the log at `info`.
    pub fn log(&self) {
        info!("report summary: {} locations", self.locations);
        for (name, stats) in [
            ("overall_discomfort", self.overall),
            ("normalized_discomfort", self.normalized),
        ] {
            match stats {
                Some(s) => info!(
                    "  {name}: count={} mean={:.4} min={:.4} max={:.4}",
                    s.count, s.mean, s.min, s.max
                ),
                None => info!("  {name}: no scored locations"),
            }
        }
    }
}
