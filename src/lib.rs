//! Facade crate for the streetsense location scoring pipeline.
//!
//! This crate re-exports the core domain types and exposes the heuristic
//! scorer and survey orchestration behind feature flags.

#![forbid(unsafe_code)]

pub use streetsense_core::{
    BoundingRegion, CapturedImage, Coordinate, Detection, DetectionResult, Detector, Factor,
    FactorScores, FactorWeights, FeatureExtractor, Grid, GridError, Heading, ImageScorer,
    ImageSink, ImageSource, LocationAssessment, LocationRecord, assess_location, finalize, grid,
    normalize,
};

#[cfg(feature = "vision")]
pub use streetsense_vision::{HeuristicScorer, ImageNetPreprocessor};

#[cfg(feature = "survey")]
pub use streetsense_survey::{Survey, SurveyConfig, SurveyReport, SurveySummary};
