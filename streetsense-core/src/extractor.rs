//! Feature extraction gate.
//!
//! Scoring does not read feature values. A successful extraction is a
//! precondition for scoring an image; a failure drops the image.

use thiserror::Error;

use crate::CapturedImage;

/// Dense features in channel-major layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// `[channels, height, width]`.
    pub shape: [usize; 3],
    /// Flattened values, `shape.iter().product()` long.
    pub values: Vec<f32>,
}

/// Errors from [`FeatureExtractor::extract`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// The image has no pixels.
    #[error("cannot extract features from a {width}x{height} image")]
    EmptyImage {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Preprocessing produced NaN or infinite values.
    #[error("feature extraction produced non-finite values")]
    NonFinite,
    /// The underlying model failed.
    #[error("feature model failed: {message}")]
    Model {
        /// Error detail.
        message: String,
    },
}

/// Turn an image into a feature vector.
///
/// Implementations are constructed once and shared by reference across the
/// whole survey.
pub trait FeatureExtractor: Send + Sync {
    /// Extract features from `image`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] when the image cannot be preprocessed.
    fn extract(&self, image: &CapturedImage) -> Result<FeatureVector, ExtractionError>;
}
