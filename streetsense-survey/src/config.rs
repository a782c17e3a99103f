//! Survey tuning knobs.

use std::num::NonZeroUsize;

use streetsense_core::FactorWeights;

/// Locations assessed at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: NonZeroUsize = NonZeroUsize::MIN.saturating_add(3);

/// Configuration for a [`Survey`](crate::Survey).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurveyConfig {
    /// Maximum number of locations in flight. Each location issues up to
    /// four imagery requests at once.
    pub concurrency: NonZeroUsize,
    /// Weights of the overall discomfort mean.
    pub weights: FactorWeights,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            weights: FactorWeights::default(),
        }
    }
}

impl SurveyConfig {
    /// Set the location concurrency.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the factor weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: FactorWeights) -> Self {
        self.weights = weights;
        self
    }
}
