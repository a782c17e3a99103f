//! Combine the per-heading scores of one location.
//!
//! A location is assessed from however many headings produced a score. A
//! missing heading shrinks the averaging set; it never counts as zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Coordinate, Factor, FactorScores, FactorWeights};

/// First-phase result for one location, before batch normalization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationAssessment {
    /// Sample point.
    pub coordinate: Coordinate,
    /// Per-factor means, or `None` when no heading could be scored.
    pub factors: Option<FactorScores>,
    /// Weighted mean of `factors`, or `None` when unscored.
    pub overall_discomfort: Option<f64>,
    /// Number of headings that contributed to `factors`.
    pub samples: usize,
    /// Identifiers of the images persisted for this location.
    pub image_ids: Vec<String>,
}

impl LocationAssessment {
    /// Report whether at least one heading was scored.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.overall_discomfort.is_some()
    }
}

/// Average each factor across `scores`.
///
/// Returns `None` when `scores` is empty. Averaging uses a running mean, so
/// identical inputs reproduce themselves exactly.
///
/// # Examples
///
/// ```
/// use streetsense_core::{FactorScores, aggregate};
///
/// let a = FactorScores::new(1.0, 0.0, 2.0, 0.0, 0.0);
/// let b = FactorScores::new(3.0, 2.0, 0.0, 0.0, 0.0);
/// let mean = aggregate(&[a, b]).expect("two samples");
/// assert_eq!(mean, FactorScores::new(2.0, 1.0, 1.0, 0.0, 0.0));
/// assert!(aggregate(&[]).is_none());
/// ```
#[must_use]
pub fn aggregate(scores: &[FactorScores]) -> Option<FactorScores> {
    if scores.is_empty() {
        return None;
    }
    Some(FactorScores::from_fn(|factor| {
        running_mean(scores.iter().map(|sample| sample.get(factor)))
    }))
}

fn running_mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut mean = 0.0;
    for (index, value) in values.enumerate() {
        let count = (index + 1) as f64;
        mean += (value - mean) / count;
    }
    mean
}

/// Weighted mean of `scores` under `weights`.
///
/// The result is not re-clamped; with non-negative weights it stays within
/// the factor ranges anyway. A zero total weight yields `0.0`.
#[must_use]
pub fn overall_discomfort(scores: &FactorScores, weights: &FactorWeights) -> f64 {
    let total = weights.total();
    if total == 0.0 {
        return 0.0;
    }
    let weighted: f64 = Factor::ALL
        .iter()
        .map(|&factor| scores.get(factor) * weights.get(factor))
        .sum();
    weighted / total
}

/// Build the first-phase assessment of one location.
///
/// `scores` holds one entry per heading that was scored successfully (zero
/// to four). With no scores the assessment is unscored but still carries the
/// coordinate, so reports keep one row per grid point.
#[must_use]
pub fn assess_location(
    coordinate: Coordinate,
    scores: &[FactorScores],
    image_ids: Vec<String>,
    weights: &FactorWeights,
) -> LocationAssessment {
    let factors = aggregate(scores);
    let overall_discomfort = factors
        .as_ref()
        .map(|mean| overall_discomfort(mean, weights));
    LocationAssessment {
        coordinate,
        factors,
        overall_discomfort,
        samples: scores.len(),
        image_ids,
    }
}
