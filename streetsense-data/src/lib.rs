//! Adapters between the streetsense pipeline and the outside world.
//!
//! - [`imagery`] fetches street-level images over HTTP.
//! - [`detection`] sends images to an object-detection service.
//! - [`DirectoryImageSink`] stores captured images as JPEG files.
//! - [`report`] writes the CSV report and hands it off downstream.

#![forbid(unsafe_code)]

pub mod detection;
pub mod imagery;
mod jpeg;
mod persist;
pub mod report;

pub use detection::{HttpDetector, HttpDetectorConfig};
pub use imagery::{ClientBuildError, DEFAULT_STREETVIEW_URL, StreetViewClient, StreetViewConfig};
pub use persist::{DirectoryImageSink, IMAGES_DIR};
pub use report::{
    PUBLISHED_REPORT_NAME, REPORT_COLUMNS, REPORT_FILE_PREFIX, ReportError, ReportRow,
    ReportSummary, publish_report, report_file_name, write_report, write_report_file,
};
