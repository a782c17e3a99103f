//! Image source trait and the fixed request parameters used by the pipeline.

use async_trait::async_trait;

use crate::{CapturedImage, Coordinate, Heading};

use super::error::FetchError;

/// Fixed capture parameters sent with every imagery request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageryRequest {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Horizontal field of view in degrees.
    pub field_of_view: u16,
    /// Camera pitch in degrees.
    pub pitch: i16,
}

impl ImageryRequest {
    /// 640×640 pixels, 90° field of view, level camera.
    pub const STANDARD: Self = Self {
        width: 640,
        height: 640,
        field_of_view: 90,
        pitch: 0,
    };

    /// The `WIDTHxHEIGHT` form used by imagery APIs.
    #[must_use]
    pub fn size_param(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

impl Default for ImageryRequest {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fetch a street-level image for one coordinate and heading.
///
/// Implementations must be thread-safe so one source can serve concurrent
/// location tasks. A failure for one heading must not affect others.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use image::RgbImage;
/// use streetsense_core::{CapturedImage, Coordinate, FetchError, Heading, ImageSource};
///
/// struct Blank;
///
/// #[async_trait]
/// impl ImageSource for Blank {
///     async fn fetch(
///         &self,
///         coordinate: Coordinate,
///         heading: Heading,
///     ) -> Result<CapturedImage, FetchError> {
///         Ok(CapturedImage::new(coordinate, heading, RgbImage::new(4, 4)))
///     }
/// }
/// ```
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Capture the view at `coordinate` facing `heading`.
    async fn fetch(
        &self,
        coordinate: Coordinate,
        heading: Heading,
    ) -> Result<CapturedImage, FetchError>;
}
