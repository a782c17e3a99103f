//! JPEG encoding shared by the detector client and the image sink.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageResult, RgbImage};

/// Quality used for every encoded capture.
pub const JPEG_QUALITY: u8 = 90;

pub fn encode(pixels: &RgbImage) -> ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    pixels.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY))?;
    Ok(bytes)
}
