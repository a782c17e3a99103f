//! Street-level images tagged with the position they were captured for.

use image::RgbImage;

use crate::{Coordinate, Heading};

/// An RGB raster captured at a coordinate and heading.
///
/// The pipeline owns a capture only for the duration of one location's
/// processing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    coordinate: Coordinate,
    heading: Heading,
    pixels: RgbImage,
}

impl CapturedImage {
    /// Tag `pixels` with the position they were captured for.
    #[must_use]
    pub const fn new(coordinate: Coordinate, heading: Heading, pixels: RgbImage) -> Self {
        Self {
            coordinate,
            heading,
            pixels,
        }
    }

    /// Sample point the image was requested for.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Direction the camera faced.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Raw RGB pixels.
    #[must_use]
    pub const fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Stable file name identifying this capture, e.g. `47.5000_-122.4000_90.jpg`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{:.4}_{:.4}_{}.jpg",
            self.coordinate.latitude(),
            self.coordinate.longitude(),
            self.heading
        )
    }
}
