//! Score a single image.
//!
//! The `ImageScorer` trait turns one [`CapturedImage`](crate::CapturedImage)
//! and its [`DetectionResult`](crate::DetectionResult) into
//! [`FactorScores`](crate::FactorScores).

use crate::{CapturedImage, DetectionResult, FactorScores};

/// Compute the five factor scores for one image.
///
/// Implementations must be pure: scoring the same image and detections twice
/// yields bit-identical results. They must be thread-safe (`Send` + `Sync`)
/// so images can be scored on a worker pool. The method is infallible; every
/// input is an already-decoded image.
///
/// # Examples
///
/// ```rust
/// use image::RgbImage;
/// use streetsense_core::{
///     CapturedImage, Coordinate, DetectionResult, FactorScores, Heading, ImageScorer,
/// };
///
/// struct Neutral;
///
/// impl ImageScorer for Neutral {
///     fn score(&self, _image: &CapturedImage, _detections: &DetectionResult) -> FactorScores {
///         FactorScores::new(0.0, 0.0, 0.0, 0.0, 0.0)
///     }
/// }
///
/// let image = CapturedImage::new(Coordinate::new(0.0, 0.0), Heading::North, RgbImage::new(1, 1));
/// let scores = Neutral.score(&image, &DetectionResult::empty());
/// assert_eq!(scores.decay(), 0.0);
/// ```
pub trait ImageScorer: Send + Sync {
    /// Score `image` given the objects detected in it.
    fn score(&self, image: &CapturedImage, detections: &DetectionResult) -> FactorScores;
}
