//! Individual image measurements and the factor scores derived from them.
//!
//! Every function here is a pure function of its inputs. Measurements work on
//! the grayscale image; each `*_score` function maps a measurement onto its
//! factor's range and saturates it there.

use std::collections::HashSet;
use std::sync::LazyLock;

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::edges::canny;
use imageproc::filter::laplacian_filter;
use imageproc::gradients::horizontal_sobel;
use streetsense_core::{DetectionResult, Factor};

/// Lower hysteresis threshold for edge detection.
pub const CANNY_LOW_THRESHOLD: f32 = 50.0;
/// Upper hysteresis threshold for edge detection.
pub const CANNY_HIGH_THRESHOLD: f32 = 150.0;
/// Detector label counted by human presence.
pub const PERSON_LABEL: &str = "person";
/// Number of people at which human presence saturates.
pub const PERSON_SATURATION: usize = 5;
/// Detector labels treated as clutter or discarded objects.
pub const CLUTTER_LABELS: [&str; 8] = [
    "bottle",
    "cup",
    "wine glass",
    "bowl",
    "vase",
    "scissors",
    "book",
    "clock",
];

const EDGE_DENSITY_SCALE: f64 = 5.0;
const GRADIENT_DIVISOR: f64 = 50.0;
const BRIGHTNESS_DIVISOR: f64 = 25.5;
const NOISE_DIVISOR: f64 = 1000.0;
const SCORE_OFFSET: f64 = 5.0;

// Rec.601 luma weights in 14-bit fixed point.
const LUMA_SHIFT: u32 = 14;
const LUMA_RED: u32 = 4899;
const LUMA_GREEN: u32 = 9617;
const LUMA_BLUE: u32 = 1868;
const LUMA_ROUNDING: u32 = 1 << (LUMA_SHIFT - 1);

static CLUTTER: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CLUTTER_LABELS.into_iter().collect());

#[expect(
    clippy::cast_precision_loss,
    reason = "pixel counts are far below 2^52"
)]
fn pixel_count(gray: &GrayImage) -> Option<f64> {
    let (width, height) = gray.dimensions();
    let count = u64::from(width) * u64::from(height);
    (count > 0).then_some(count as f64)
}

/// Converts an RGB image to 8-bit luma with Rec.601 weights.
///
/// Each pixel becomes `0.299 R + 0.587 G + 0.114 B`, rounded to nearest in
/// 14-bit fixed point. All pixel-based measures expect this conversion.
#[must_use]
pub fn luma(image: &RgbImage) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let Rgb([red, green, blue]) = *image.get_pixel(x, y);
        let weighted = u32::from(red) * LUMA_RED
            + u32::from(green) * LUMA_GREEN
            + u32::from(blue) * LUMA_BLUE
            + LUMA_ROUNDING;
        Luma([u8::try_from(weighted >> LUMA_SHIFT).unwrap_or(u8::MAX)])
    })
}

/// Fraction of pixels marked as edges by the Canny detector.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "edge density is a ratio of pixel counts"
)]
#[must_use]
pub fn edge_density(gray: &GrayImage) -> f64 {
    let Some(total) = pixel_count(gray) else {
        return 0.0;
    };
    let edges = canny(gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);
    let marked = edges.pixels().filter(|pixel| pixel.0[0] > 0).count();
    marked as f64 / total
}

/// Number of detections whose label is in [`CLUTTER_LABELS`].
#[must_use]
pub fn clutter_count(detections: &DetectionResult) -> usize {
    detections.count_matching(|label| CLUTTER.contains(label))
}

/// Decay: edge density scaled by five, minus one per clutter object.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "decay combines a density with an object count"
)]
#[must_use]
pub fn decay_score(gray: &GrayImage, detections: &DetectionResult) -> f64 {
    let raw = edge_density(gray) * EDGE_DENSITY_SCALE - clutter_count(detections) as f64;
    Factor::Decay.clamp(raw)
}

/// Human presence: number of people, saturating at [`PERSON_SATURATION`].
#[expect(
    clippy::cast_precision_loss,
    reason = "the count is at most PERSON_SATURATION"
)]
#[must_use]
pub fn human_presence_score(detections: &DetectionResult) -> f64 {
    let people = detections.count_label(PERSON_LABEL).min(PERSON_SATURATION);
    Factor::HumanPresence.clamp(people as f64)
}

/// Mean absolute horizontal Sobel response.
#[expect(
    clippy::float_arithmetic,
    reason = "mean of gradient magnitudes"
)]
#[must_use]
pub fn mean_horizontal_gradient(gray: &GrayImage) -> f64 {
    let Some(total) = pixel_count(gray) else {
        return 0.0;
    };
    let gradient = horizontal_sobel(gray);
    let sum: f64 = gradient
        .pixels()
        .map(|pixel| f64::from(pixel.0[0].unsigned_abs()))
        .sum();
    sum / total
}

/// Visibility: mean horizontal gradient over fifty, shifted down by five.
#[expect(clippy::float_arithmetic, reason = "linear mapping onto the factor range")]
#[must_use]
pub fn visibility_score(gray: &GrayImage) -> f64 {
    Factor::Visibility.clamp(mean_horizontal_gradient(gray) / GRADIENT_DIVISOR - SCORE_OFFSET)
}

/// Mean grayscale brightness in `0.0..=255.0`.
#[expect(clippy::float_arithmetic, reason = "mean of pixel intensities")]
#[must_use]
pub fn mean_brightness(gray: &GrayImage) -> f64 {
    let Some(total) = pixel_count(gray) else {
        return 0.0;
    };
    let sum: f64 = gray.pixels().map(|pixel| f64::from(pixel.0[0])).sum();
    sum / total
}

/// Lighting: brightness mapped linearly from `0..=255` onto `-5..=5`.
#[expect(clippy::float_arithmetic, reason = "linear mapping onto the factor range")]
#[must_use]
pub fn lighting_score(gray: &GrayImage) -> f64 {
    Factor::Lighting.clamp(mean_brightness(gray) / BRIGHTNESS_DIVISOR - SCORE_OFFSET)
}

/// Population variance of the Laplacian response.
#[expect(clippy::float_arithmetic, reason = "variance of filter responses")]
#[must_use]
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let Some(total) = pixel_count(gray) else {
        return 0.0;
    };
    let response = laplacian_filter(gray);
    let values = || response.pixels().map(|pixel| f64::from(pixel.0[0]));
    let mean = values().sum::<f64>() / total;
    values()
        .map(|value| {
            let deviation = value - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / total
}

/// Maintenance: five minus the Laplacian variance over a thousand.
#[expect(clippy::float_arithmetic, reason = "linear mapping onto the factor range")]
#[must_use]
pub fn maintenance_score(gray: &GrayImage) -> f64 {
    Factor::Maintenance.clamp(SCORE_OFFSET - laplacian_variance(gray) / NOISE_DIVISOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use streetsense_core::{BoundingBox, Detection};

    fn flat(value: u8) -> GrayImage {
        GrayImage::from_pixel(32, 32, Luma([value]))
    }

    fn stripes() -> GrayImage {
        GrayImage::from_fn(32, 32, |x, _| if (x / 4) % 2 == 0 { Luma([0]) } else { Luma([255]) })
    }

    fn detections(labels: &[&str]) -> DetectionResult {
        labels
            .iter()
            .map(|label| Detection::new(*label, 0.9, BoundingBox::default()))
            .collect()
    }

    #[rstest]
    #[case(0, -5.0)]
    #[case(255, 5.0)]
    #[case(51, -3.0)]
    fn lighting_maps_brightness(#[case] value: u8, #[case] expected: f64) {
        assert!((lighting_score(&flat(value)) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(Rgb([255, 0, 0]), 76)]
    #[case(Rgb([0, 255, 0]), 150)]
    #[case(Rgb([0, 0, 255]), 29)]
    #[case(Rgb([40, 160, 230]), 132)]
    #[case(Rgb([255, 255, 255]), 255)]
    fn luma_uses_rec601_weights(#[case] colour: Rgb<u8>, #[case] expected: u8) {
        let gray = luma(&RgbImage::from_pixel(4, 4, colour));
        assert!(gray.pixels().all(|pixel| pixel.0[0] == expected));
    }

    #[rstest]
    fn flat_image_has_no_structure() {
        let gray = flat(128);
        assert_eq!(edge_density(&gray), 0.0);
        assert_eq!(mean_horizontal_gradient(&gray), 0.0);
        assert_eq!(laplacian_variance(&gray), 0.0);
        assert_eq!(visibility_score(&gray), -5.0);
        assert_eq!(maintenance_score(&gray), 5.0);
    }

    #[rstest]
    fn stripes_raise_edges_and_gradients() {
        let gray = stripes();
        assert!(edge_density(&gray) > 0.0);
        assert!(mean_horizontal_gradient(&gray) > 0.0);
        assert!(laplacian_variance(&gray) > 0.0);
        assert!(maintenance_score(&gray) < 5.0);
    }

    #[rstest]
    fn duplicate_vocabulary_does_not_double_count() {
        let found = detections(&["vase", "person", "bottle", "car"]);
        assert_eq!(clutter_count(&found), 2);
    }

    #[rstest]
    fn clutter_lowers_decay() {
        let gray = flat(90);
        let found = detections(&["bottle", "cup", "book"]);
        assert_eq!(decay_score(&gray, &found), -3.0);
        assert_eq!(decay_score(&gray, &DetectionResult::empty()), 0.0);
    }

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&["person"], 1.0)]
    #[case(&["person", "bicycle", "person"], 2.0)]
    #[case(&["person"; 9], 5.0)]
    fn human_presence_saturates(#[case] labels: &[&str], #[case] expected: f64) {
        assert_eq!(human_presence_score(&detections(labels)), expected);
    }

    #[rstest]
    fn empty_image_measures_neutral() {
        let gray = GrayImage::new(0, 0);
        assert_eq!(edge_density(&gray), 0.0);
        assert_eq!(mean_brightness(&gray), 0.0);
        assert_eq!(laplacian_variance(&gray), 0.0);
    }
}
