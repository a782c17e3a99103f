//! Batch-wide min-max normalization of overall discomfort.
//!
//! This is the second phase of a location's lifecycle. It runs once every
//! location has been assessed, because it needs the global minimum and
//! maximum.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coordinate, FactorScores, LocationAssessment};

/// Value assigned to every location when the batch has a single distinct score.
pub const DEGENERATE_NORMALIZED: f64 = 0.5;

/// Final per-location result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    /// Sample point.
    pub coordinate: Coordinate,
    /// Per-factor means, or `None` when unscored.
    pub factors: Option<FactorScores>,
    /// Weighted mean of `factors`, or `None` when unscored.
    pub overall_discomfort: Option<f64>,
    /// `overall_discomfort` rescaled against the batch, in `0.0..=1.0`.
    pub normalized_discomfort: Option<f64>,
    /// Number of headings that contributed to `factors`.
    pub samples: usize,
    /// Identifiers of the images persisted for this location.
    pub image_ids: Vec<String>,
}

impl LocationRecord {
    fn from_assessment(assessment: LocationAssessment, normalized_discomfort: Option<f64>) -> Self {
        let LocationAssessment {
            coordinate,
            factors,
            overall_discomfort,
            samples,
            image_ids,
        } = assessment;
        Self {
            coordinate,
            factors,
            overall_discomfort,
            normalized_discomfort,
            samples,
            image_ids,
        }
    }
}

/// Rescale `values` to `0.0..=1.0` by min-max normalization.
///
/// The output has the same length and order as the input. When every value
/// is equal (including a single value) each output is
/// [`DEGENERATE_NORMALIZED`].
///
/// # Examples
///
/// ```
/// use streetsense_core::normalize;
///
/// assert_eq!(normalize(&[1.0, 3.0, 2.0]), vec![0.0, 1.0, 0.5]);
/// assert_eq!(normalize(&[7.0, 7.0]), vec![0.5, 0.5]);
/// assert!(normalize(&[]).is_empty());
/// ```
#[must_use]
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);
    let span = max - min;
    if span == 0.0 {
        return vec![DEGENERATE_NORMALIZED; values.len()];
    }
    values
        .iter()
        .map(|value| ((value - min) / span).clamp(0.0, 1.0))
        .collect()
}

/// Normalize a fully assessed batch and produce the final records.
///
/// Unscored locations are excluded from the min-max computation and keep a
/// `None` normalized score; every input appears in the output in order.
#[must_use]
pub fn finalize(assessments: Vec<LocationAssessment>) -> Vec<LocationRecord> {
    let scored: Vec<f64> = assessments
        .iter()
        .filter_map(|assessment| assessment.overall_discomfort)
        .collect();
    let mut normalized = normalize(&scored).into_iter();
    assessments
        .into_iter()
        .map(|assessment| {
            let value = if assessment.is_scored() {
                normalized.next()
            } else {
                None
            };
            LocationRecord::from_assessment(assessment, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FactorWeights, assess_location};
    use proptest::prelude::*;
    use rstest::rstest;

    fn scored(latitude: f64, overall: f64) -> LocationAssessment {
        let scores = FactorScores::new(overall, overall, overall, overall, overall);
        assess_location(
            Coordinate::new(latitude, 0.0),
            &[scores],
            Vec::new(),
            &FactorWeights::default(),
        )
    }

    fn unscored(latitude: f64) -> LocationAssessment {
        assess_location(
            Coordinate::new(latitude, 0.0),
            &[],
            Vec::new(),
            &FactorWeights::default(),
        )
    }

    #[rstest]
    fn two_locations_span_unit_interval() {
        let records = finalize(vec![scored(0.0, 1.0), scored(1.0, 3.0)]);
        let normalized: Vec<_> = records.iter().map(|r| r.normalized_discomfort).collect();
        assert_eq!(normalized, [Some(0.0), Some(1.0)]);
    }

    #[rstest]
    fn unscored_locations_are_skipped_but_reported() {
        let records = finalize(vec![
            scored(0.0, 1.0),
            unscored(1.0),
            scored(2.0, 2.0),
            scored(3.0, 3.0),
        ]);
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].normalized_discomfort, None);
        assert_eq!(records[1].overall_discomfort, None);
        assert_eq!(records[2].normalized_discomfort, Some(0.5));
        assert_eq!(records[3].normalized_discomfort, Some(1.0));
    }

    #[rstest]
    fn single_scored_location_is_degenerate() {
        let records = finalize(vec![unscored(0.0), scored(1.0, -2.0)]);
        assert_eq!(records[1].normalized_discomfort, Some(DEGENERATE_NORMALIZED));
    }

    #[rstest]
    fn all_unscored_batch_has_no_normalized_values() {
        let records = finalize(vec![unscored(0.0), unscored(1.0)]);
        assert!(records.iter().all(|r| r.normalized_discomfort.is_none()));
    }

    proptest! {
        #[test]
        fn outputs_stay_in_unit_interval(values in proptest::collection::vec(-5.0_f64..5.0, 1..64)) {
            let normalized = normalize(&values);
            prop_assert_eq!(normalized.len(), values.len());
            prop_assert!(normalized.iter().all(|v| (0.0..=1.0).contains(v)));
        }

        #[test]
        fn extremes_map_to_bounds(values in proptest::collection::vec(-5.0_f64..5.0, 2..64)) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(max > min);
            let normalized = normalize(&values);
            for (value, scaled) in values.iter().zip(&normalized) {
                if *value == min {
                    prop_assert_eq!(*scaled, 0.0);
                }
                if *value == max {
                    prop_assert_eq!(*scaled, 1.0);
                }
            }
        }

        #[test]
        fn identical_values_map_to_half(value in -5.0_f64..5.0, count in 1_usize..32) {
            let normalized = normalize(&vec![value; count]);
            prop_assert!(normalized.iter().all(|v| *v == DEGENERATE_NORMALIZED));
        }
    }
}
