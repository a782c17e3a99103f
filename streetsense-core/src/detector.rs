//! Object detection capability.

use async_trait::async_trait;
use thiserror::Error;

use crate::{CapturedImage, DetectionResult};

/// Errors from [`Detector::detect`].
///
/// The pipeline treats a detection failure like a fetch failure: the image is
/// dropped from its location's averaging set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// The image could not be encoded for the detector.
    #[error("failed to encode image for detection: {message}")]
    Encode {
        /// Error detail.
        message: String,
    },
    /// The detector did not answer within the configured timeout.
    #[error("detection request to {endpoint} timed out after {timeout_secs}s")]
    Timeout {
        /// Detector endpoint.
        endpoint: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The detector could not be reached or rejected the request.
    #[error("detection request to {endpoint} failed: {message}")]
    Request {
        /// Detector endpoint.
        endpoint: String,
        /// Error detail.
        message: String,
    },
    /// The detector's answer could not be understood.
    #[error("failed to parse detection response: {message}")]
    Parse {
        /// Error detail.
        message: String,
    },
}

/// Label objects in an image.
///
/// The class vocabulary must at least distinguish `"person"` and the clutter
/// objects used by decay scoring. Model weights are loaded once by the
/// implementation and shared across calls.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Return the labelled boxes found in `image`.
    async fn detect(&self, image: &CapturedImage) -> Result<DetectionResult, DetectionError>;
}
