//! Geographic sample points, survey regions and viewing headings.

use std::fmt;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 sample point.
///
/// Stored as a [`geo::Coord`] with `x = longitude` and `y = latitude`, the
/// same convention the rest of the `geo` ecosystem uses.
///
/// # Examples
///
/// ```
/// use streetsense_core::Coordinate;
///
/// let point = Coordinate::new(47.6, -122.3);
/// assert_eq!(point.latitude(), 47.6);
/// assert_eq!(point.longitude(), -122.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate(Coord<f64>);

impl Coordinate {
    /// Build a coordinate from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.0.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.0.x
    }

    /// The underlying `geo` coordinate.
    #[must_use]
    pub const fn as_coord(self) -> Coord<f64> {
        self.0
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(coord: Coord<f64>) -> Self {
        Self(coord)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude(), self.longitude())
    }
}

/// Rectangular latitude/longitude region sampled by the grid generator.
///
/// Bounds are inclusive. A region whose minimum exceeds its maximum on either
/// axis is valid and simply contains no grid points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingRegion {
    /// Southern bound in degrees.
    pub lat_min: f64,
    /// Northern bound in degrees.
    pub lat_max: f64,
    /// Western bound in degrees.
    pub lon_min: f64,
    /// Eastern bound in degrees.
    pub lon_max: f64,
}

impl BoundingRegion {
    /// Approximate extent of the city of Seattle.
    pub const SEATTLE: Self = Self::new(47.5, 47.7, -122.4, -122.3);

    /// Build a region from its four bounds.
    #[must_use]
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Report whether every bound is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.lat_min, self.lat_max, self.lon_min, self.lon_max]
            .iter()
            .all(|bound| bound.is_finite())
    }
}

impl Default for BoundingRegion {
    fn default() -> Self {
        Self::SEATTLE
    }
}

/// Compass direction a street-level image is captured at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heading {
    /// 0 degrees.
    North,
    /// 90 degrees.
    East,
    /// 180 degrees.
    South,
    /// 270 degrees.
    West,
}

impl Heading {
    /// Every heading sampled per location, in capture order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Heading in whole degrees clockwise from north.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::North => 0,
            Self::East => 90,
            Self::South => 180,
            Self::West => 270,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
