//! Core domain types for the streetsense location scoring pipeline.
//!
//! The crate covers everything with non-trivial data flow: grid generation
//! over a region, per-location aggregation across viewing headings and
//! batch-wide normalization. Imagery, detection, feature extraction and
//! per-image scoring sit behind capability traits so the pipeline can run
//! against synthetic pixels and detections.
//!
//! A location goes through two explicit phases:
//! 1. [`assess_location`] averages the scores of its successful headings and
//!    produces a [`LocationAssessment`].
//! 2. [`finalize`] runs once the whole batch is assessed and back-fills the
//!    normalized discomfort of every [`LocationRecord`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod capture;
mod coordinate;
mod detection;
mod detector;
mod extractor;
mod factors;
mod grid;
pub mod imagery;
mod normalize;
mod scorer;
mod sink;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use aggregate::{LocationAssessment, aggregate, assess_location, overall_discomfort};
pub use capture::CapturedImage;
pub use coordinate::{BoundingRegion, Coordinate, Heading};
pub use detection::{BoundingBox, Detection, DetectionResult};
pub use detector::{DetectionError, Detector};
pub use extractor::{ExtractionError, FeatureExtractor, FeatureVector};
pub use factors::{Factor, FactorScores, FactorWeights, SCORE_MAX, SCORE_MIN};
pub use grid::{Grid, GridError, MAX_GRID_POINTS, grid};
pub use imagery::{FetchError, ImageSource, ImageryRequest};
pub use normalize::{DEGENERATE_NORMALIZED, LocationRecord, finalize, normalize};
pub use scorer::ImageScorer;
pub use sink::{ImageSink, SinkError};
