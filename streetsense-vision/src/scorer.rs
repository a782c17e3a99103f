//! Heuristic per-image scorer.

use log::trace;
use streetsense_core::{CapturedImage, DetectionResult, FactorScores, ImageScorer};

use crate::measures::{
    decay_score, human_presence_score, lighting_score, luma, maintenance_score, visibility_score,
};

/// Scores images from pixel statistics and detector output.
///
/// The scorer holds no state; every call derives the grayscale image afresh
/// and evaluates the five factor measures on it.
///
/// # Examples
///
/// ```rust
/// use image::{Rgb, RgbImage};
/// use streetsense_core::{CapturedImage, Coordinate, DetectionResult, Heading, ImageScorer};
/// use streetsense_vision::HeuristicScorer;
///
/// let pixels = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
/// let image = CapturedImage::new(Coordinate::new(47.6, -122.3), Heading::East, pixels);
/// let scores = HeuristicScorer.score(&image, &DetectionResult::empty());
/// assert_eq!(scores.lighting(), 5.0);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl ImageScorer for HeuristicScorer {
    fn score(&self, image: &CapturedImage, detections: &DetectionResult) -> FactorScores {
        let gray = luma(image.pixels());
        let scores = FactorScores::new(
            decay_score(&gray, detections),
            human_presence_score(detections),
            visibility_score(&gray),
            lighting_score(&gray),
            maintenance_score(&gray),
        );
        trace!(
            "scored {} heading {}: {scores:?}",
            image.coordinate(),
            image.heading()
        );
        scores
    }
}
