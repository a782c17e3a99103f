//! Property tests for the heuristic scorer.

use image::{Rgb, RgbImage};
use proptest::prelude::*;
use streetsense_core::{
    BoundingBox, CapturedImage, Coordinate, Detection, DetectionResult, Factor, Heading,
    ImageScorer,
};
use streetsense_vision::HeuristicScorer;

const LABELS: [&str; 5] = ["person", "bottle", "car", "vase", "dog"];

fn image_strategy() -> impl Strategy<Value = RgbImage> {
    (1_u32..24, 1_u32..24).prop_flat_map(|(width, height)| {
        proptest::collection::vec(any::<[u8; 3]>(), (width * height) as usize).prop_map(
            move |raw| {
                let mut pixels = RgbImage::new(width, height);
                for (slot, value) in pixels.pixels_mut().zip(raw) {
                    *slot = Rgb(value);
                }
                pixels
            },
        )
    })
}

fn detections_strategy() -> impl Strategy<Value = DetectionResult> {
    proptest::collection::vec(0_usize..LABELS.len(), 0..12).prop_map(|indices| {
        indices
            .into_iter()
            .map(|index| Detection::new(LABELS[index], 0.5, BoundingBox::default()))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_factor_stays_in_range(pixels in image_strategy(), found in detections_strategy()) {
        let image = CapturedImage::new(Coordinate::new(47.6, -122.3), Heading::North, pixels);
        let scores = HeuristicScorer.score(&image, &found);
        for factor in Factor::ALL {
            prop_assert!(factor.range().contains(&scores.get(factor)));
        }
    }

    #[test]
    fn scoring_twice_is_identical(pixels in image_strategy(), found in detections_strategy()) {
        let image = CapturedImage::new(Coordinate::new(47.6, -122.3), Heading::West, pixels);
        prop_assert_eq!(
            HeuristicScorer.score(&image, &found),
            HeuristicScorer.score(&image, &found)
        );
    }
}
