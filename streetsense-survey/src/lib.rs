//! Survey orchestration.
//!
//! A [`Survey`] walks a sequence of coordinates, captures the four headings
//! of each location concurrently, scores every usable image and aggregates
//! the results per location. Once every location has been assessed the batch
//! is normalized in a single pass and returned as a [`SurveyReport`].
//!
//! Per-image failures never abort the batch: the image is dropped from its
//! location's averaging set and the failure is logged.

#![forbid(unsafe_code)]

mod config;
mod report;
mod survey;

pub use config::{DEFAULT_CONCURRENCY, SurveyConfig};
pub use report::{SurveyReport, SurveySummary};
pub use survey::Survey;
