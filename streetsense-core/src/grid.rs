//! Raster-scan sample points over a bounding region.
//!
//! Points are produced latitude-major: the outer loop walks latitude from the
//! southern bound northwards, the inner loop walks longitude from west to
//! east. Both upper bounds are inclusive when they fall on a grid node.
//!
//! Point counts are derived algebraically rather than by repeatedly adding
//! the step, so long scans never drift past the upper bound.

use thiserror::Error;

use crate::{BoundingRegion, Coordinate};

/// Fraction of a step within which an upper bound still counts as a node.
const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Largest grid a single survey may request.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Errors returned by [`grid`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The step was zero, negative or not a number.
    #[error("grid step must be a positive, finite number of degrees (got {step})")]
    InvalidStep {
        /// Rejected step size.
        step: f64,
    },
    /// A bound was NaN or infinite.
    #[error("grid bounds must be finite")]
    NonFiniteBounds,
    /// The region and step would produce an unreasonable number of points.
    #[error("grid of {points} points exceeds the limit of {MAX_GRID_POINTS}")]
    TooManyPoints {
        /// Requested point count (saturating).
        points: usize,
    },
}

/// Iterator over the sample points of a region.
///
/// # Examples
///
/// ```
/// use streetsense_core::{BoundingRegion, grid};
///
/// let region = BoundingRegion::new(0.0, 0.01, 10.0, 10.02);
/// let points: Vec<_> = grid(region, 0.01)?.collect();
/// assert_eq!(points.len(), 2 * 3);
/// assert_eq!(points[0].latitude(), 0.0);
/// assert_eq!(points[1].longitude(), 10.01);
/// # Ok::<(), streetsense_core::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    region: BoundingRegion,
    step: f64,
    lat_count: usize,
    lon_count: usize,
    next: usize,
}

/// Enumerate sample points over `region` at `step` degrees.
///
/// # Errors
///
/// Returns [`GridError`] when the step is not positive and finite, when any
/// bound is not finite, or when the grid exceeds [`MAX_GRID_POINTS`].
pub fn grid(region: BoundingRegion, step: f64) -> Result<Grid, GridError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(GridError::InvalidStep { step });
    }
    if !region.is_finite() {
        return Err(GridError::NonFiniteBounds);
    }
    let lat_count = axis_count(region.lat_min, region.lat_max, step);
    let lon_count = axis_count(region.lon_min, region.lon_max, step);
    let points = lat_count.saturating_mul(lon_count);
    if points > MAX_GRID_POINTS {
        return Err(GridError::TooManyPoints { points });
    }
    Ok(Grid {
        region,
        step,
        lat_count,
        lon_count,
        next: 0,
    })
}

/// Number of nodes in `min..=max` spaced `step` apart.
fn axis_count(min: f64, max: f64, step: f64) -> usize {
    if max < min {
        return 0;
    }
    let intervals = ((max - min) / step + BOUNDARY_TOLERANCE).floor();
    // Float-to-int casts saturate, so absurd spans clamp to usize::MAX and are
    // then rejected by the point limit.
    (intervals as usize).saturating_add(1)
}

impl Grid {
    /// Total number of points in the grid.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.lat_count * self.lon_count
    }

    /// Number of latitude rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.lat_count
    }

    /// Number of longitude columns per row.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.lon_count
    }

    fn coordinate_at(&self, index: usize) -> Coordinate {
        let row = index / self.lon_count;
        let column = index % self.lon_count;
        Coordinate::new(
            self.region.lat_min + row as f64 * self.step,
            self.region.lon_min + column as f64 * self.step,
        )
    }
}

impl Iterator for Grid {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.point_count() {
            return None;
        }
        let coordinate = self.coordinate_at(self.next);
        self.next += 1;
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.point_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Grid {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    fn seattle_grid_matches_inclusive_scan() {
        let points = grid(BoundingRegion::SEATTLE, 0.005).expect("valid grid");
        assert_eq!(points.rows(), 41);
        assert_eq!(points.columns(), 21);
        assert_eq!(points.len(), 41 * 21);
    }

    #[rstest]
    fn order_is_latitude_major() {
        let region = BoundingRegion::new(1.0, 2.0, 5.0, 6.0);
        let points: Vec<_> = grid(region, 1.0).expect("valid grid").collect();
        let expected = [
            Coordinate::new(1.0, 5.0),
            Coordinate::new(1.0, 6.0),
            Coordinate::new(2.0, 5.0),
            Coordinate::new(2.0, 6.0),
        ];
        assert_eq!(points, expected);
    }

    #[rstest]
    fn upper_bound_off_node_is_not_overshot() {
        let region = BoundingRegion::new(0.0, 0.25, 0.0, 0.0);
        let points: Vec<_> = grid(region, 0.1).expect("valid grid").collect();
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.latitude() <= 0.25));
    }

    #[rstest]
    fn degenerate_region_yields_single_point() {
        let region = BoundingRegion::new(3.0, 3.0, 4.0, 4.0);
        let points: Vec<_> = grid(region, 0.5).expect("valid grid").collect();
        assert_eq!(points, [Coordinate::new(3.0, 4.0)]);
    }

    #[rstest]
    #[case(BoundingRegion::new(1.0, 0.0, 0.0, 1.0))]
    #[case(BoundingRegion::new(0.0, 1.0, 1.0, 0.0))]
    fn inverted_region_is_empty(#[case] region: BoundingRegion) {
        let points = grid(region, 0.1).expect("inverted regions are valid");
        assert_eq!(points.len(), 0);
        assert_eq!(points.count(), 0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_step(#[case] step: f64) {
        let err = grid(BoundingRegion::SEATTLE, step).expect_err("step should be rejected");
        assert!(matches!(err, GridError::InvalidStep { .. }));
    }

    #[rstest]
    fn rejects_non_finite_bounds() {
        let region = BoundingRegion::new(0.0, f64::INFINITY, 0.0, 1.0);
        let err = grid(region, 0.1).expect_err("bounds should be rejected");
        assert_eq!(err, GridError::NonFiniteBounds);
    }

    #[rstest]
    fn rejects_oversized_grid() {
        let region = BoundingRegion::new(-90.0, 90.0, -180.0, 180.0);
        let err = grid(region, 0.0001).expect_err("grid should be too large");
        assert!(matches!(err, GridError::TooManyPoints { .. }));
    }

    proptest! {
        #[test]
        fn count_matches_node_arithmetic(
            lat_min in -80.0_f64..80.0,
            lon_min in -170.0_f64..170.0,
            lat_steps in 0_usize..40,
            lon_steps in 0_usize..40,
            step in 0.001_f64..0.05,
        ) {
            let region = BoundingRegion::new(
                lat_min,
                lat_min + lat_steps as f64 * step,
                lon_min,
                lon_min + lon_steps as f64 * step,
            );
            let points: Vec<_> = grid(region, step).expect("valid grid").collect();
            prop_assert_eq!(points.len(), (lat_steps + 1) * (lon_steps + 1));
        }

        #[test]
        fn points_are_ordered_and_bounded(
            lat_min in -10.0_f64..10.0,
            lon_min in -10.0_f64..10.0,
            lat_span in 0.0_f64..0.3,
            lon_span in 0.0_f64..0.3,
            step in 0.01_f64..0.1,
        ) {
            let region = BoundingRegion::new(lat_min, lat_min + lat_span, lon_min, lon_min + lon_span);
            let points: Vec<_> = grid(region, step).expect("valid grid").collect();
            let tolerance = step * 1e-6;
            for pair in points.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(
                    a.latitude() < b.latitude()
                        || (a.latitude() == b.latitude() && a.longitude() < b.longitude())
                );
            }
            for p in &points {
                prop_assert!(p.latitude() <= region.lat_max + tolerance);
                prop_assert!(p.longitude() <= region.lon_max + tolerance);
            }
        }
    }
}
