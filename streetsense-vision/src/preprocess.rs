//! Classifier-style preprocessing used as the feature extraction gate.

use image::RgbImage;
use image::imageops::{FilterType, resize};
use streetsense_core::{CapturedImage, ExtractionError, FeatureExtractor, FeatureVector};

/// Length of the shortest side after resizing.
pub const RESIZE_SHORTEST_SIDE: u32 = 256;
/// Side length of the centre crop.
pub const CROP_SIDE: u32 = 224;
/// Per-channel ImageNet means.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// Per-channel ImageNet standard deviations.
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Resizes, centre-crops and normalizes an image into a CHW tensor.
///
/// No model consumes the tensor. Producing it proves the image decodes into
/// something a classifier could accept.
#[derive(Debug, Clone, Copy)]
pub struct ImageNetPreprocessor {
    shortest_side: u32,
    crop_side: u32,
}

impl ImageNetPreprocessor {
    /// Create a preprocessor with explicit resize and crop sizes.
    ///
    /// The crop is limited to the resized shortest side.
    #[must_use]
    pub const fn new(shortest_side: u32, crop_side: u32) -> Self {
        let crop = if crop_side > shortest_side {
            shortest_side
        } else {
            crop_side
        };
        Self {
            shortest_side,
            crop_side: crop,
        }
    }

    /// Crop side length in pixels.
    #[must_use]
    pub const fn crop_side(&self) -> u32 {
        self.crop_side
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "scaled dimensions are rounded back to whole pixels"
    )]
    fn resized(&self, pixels: &RgbImage) -> RgbImage {
        let (width, height) = pixels.dimensions();
        let shortest = width.min(height);
        let scale = f64::from(self.shortest_side) / f64::from(shortest);
        let target_w = (f64::from(width) * scale).round().max(1.0) as u32;
        let target_h = (f64::from(height) * scale).round().max(1.0) as u32;
        resize(pixels, target_w, target_h, FilterType::Triangle)
    }

    #[expect(
        clippy::integer_division,
        reason = "centre offsets are whole pixels"
    )]
    fn centre_crop(&self, pixels: &RgbImage) -> RgbImage {
        let (width, height) = pixels.dimensions();
        let side_w = self.crop_side.min(width);
        let side_h = self.crop_side.min(height);
        let x = (width - side_w) / 2;
        let y = (height - side_h) / 2;
        image::imageops::crop_imm(pixels, x, y, side_w, side_h).to_image()
    }
}

impl Default for ImageNetPreprocessor {
    fn default() -> Self {
        Self::new(RESIZE_SHORTEST_SIDE, CROP_SIDE)
    }
}

impl FeatureExtractor for ImageNetPreprocessor {
    #[expect(
        clippy::float_arithmetic,
        reason = "per-channel normalization"
    )]
    fn extract(&self, image: &CapturedImage) -> Result<FeatureVector, ExtractionError> {
        let pixels = image.pixels();
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(ExtractionError::EmptyImage { width, height });
        }
        let cropped = self.centre_crop(&self.resized(pixels));
        let (crop_w, crop_h) = cropped.dimensions();
        let mut values = Vec::with_capacity(crop_w as usize * crop_h as usize * 3);
        for (channel, (mean, std)) in IMAGENET_MEAN.iter().zip(IMAGENET_STD).enumerate() {
            values.extend(cropped.pixels().map(|pixel| {
                let raw = pixel.0.get(channel).copied().unwrap_or_default();
                (f32::from(raw) / 255.0 - mean) / std
            }));
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ExtractionError::NonFinite);
        }
        Ok(FeatureVector {
            shape: [3, crop_h as usize, crop_w as usize],
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use rstest::rstest;
    use streetsense_core::{Coordinate, Heading};

    fn captured(width: u32, height: u32) -> CapturedImage {
        CapturedImage::new(
            Coordinate::new(47.55, -122.31),
            Heading::West,
            RgbImage::from_pixel(width, height, Rgb([124, 116, 104])),
        )
    }

    #[rstest]
    #[case(640, 640)]
    #[case(640, 480)]
    #[case(300, 900)]
    fn produces_centre_crop(#[case] width: u32, #[case] height: u32) {
        let features = ImageNetPreprocessor::default()
            .extract(&captured(width, height))
            .expect("extraction succeeds");
        assert_eq!(features.shape, [3, 224, 224]);
        assert_eq!(features.values.len(), 3 * 224 * 224);
    }

    #[rstest]
    fn mean_pixel_normalizes_near_zero() {
        let features = ImageNetPreprocessor::default()
            .extract(&captured(256, 256))
            .expect("extraction succeeds");
        assert!(features.values.iter().all(|value| value.abs() < 0.05));
    }

    #[rstest]
    fn empty_image_is_rejected() {
        let err = ImageNetPreprocessor::default()
            .extract(&captured(0, 0))
            .expect_err("empty image fails");
        assert_eq!(err, ExtractionError::EmptyImage { width: 0, height: 0 });
    }

    #[rstest]
    fn crop_never_exceeds_resize() {
        assert_eq!(ImageNetPreprocessor::new(100, 224).crop_side(), 100);
    }
}
