//! Per-image factor scores and the weights used to combine them.

use std::fmt;
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower bound shared by the signed factors.
pub const SCORE_MIN: f64 = -5.0;
/// Upper bound shared by every factor.
pub const SCORE_MAX: f64 = 5.0;

/// One of the five heuristic measures computed per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Factor {
    /// Visual clutter and discarded objects.
    Decay,
    /// Number of people in view, saturating at five.
    HumanPresence,
    /// Horizontal structure as a proxy for open sightlines.
    Visibility,
    /// Mean brightness.
    Lighting,
    /// Absence of high-frequency texture noise.
    Maintenance,
}

impl Factor {
    /// Every factor, in report column order.
    pub const ALL: [Self; 5] = [
        Self::Decay,
        Self::HumanPresence,
        Self::Visibility,
        Self::Lighting,
        Self::Maintenance,
    ];

    /// Snake-case name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Decay => "decay",
            Self::HumanPresence => "human_presence",
            Self::Visibility => "visibility",
            Self::Lighting => "lighting",
            Self::Maintenance => "maintenance",
        }
    }

    /// Inclusive range a score for this factor is saturated into.
    #[must_use]
    pub const fn range(self) -> RangeInclusive<f64> {
        match self {
            Self::HumanPresence => 0.0..=SCORE_MAX,
            Self::Decay | Self::Visibility | Self::Lighting | Self::Maintenance => {
                SCORE_MIN..=SCORE_MAX
            }
        }
    }

    /// Saturate `raw` into [`Factor::range`].
    ///
    /// Non-finite values carry no information and map to `0.0`.
    #[must_use]
    pub fn clamp(self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return 0.0;
        }
        let range = self.range();
        raw.clamp(*range.start(), *range.end())
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five factor scores of one image, or the average over a location.
///
/// Values are always inside their factor's range: the only constructor
/// saturates its inputs.
///
/// # Examples
///
/// ```
/// use streetsense_core::{Factor, FactorScores};
///
/// let scores = FactorScores::new(9.0, -1.0, 0.5, f64::NAN, -7.0);
/// assert_eq!(scores.get(Factor::Decay), 5.0);
/// assert_eq!(scores.get(Factor::HumanPresence), 0.0);
/// assert_eq!(scores.get(Factor::Lighting), 0.0);
/// assert_eq!(scores.get(Factor::Maintenance), -5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorScores {
    decay: f64,
    human_presence: f64,
    visibility: f64,
    lighting: f64,
    maintenance: f64,
}

impl FactorScores {
    /// Build scores from raw measurements, saturating each into its range.
    #[must_use]
    pub fn new(
        decay: f64,
        human_presence: f64,
        visibility: f64,
        lighting: f64,
        maintenance: f64,
    ) -> Self {
        Self {
            decay: Factor::Decay.clamp(decay),
            human_presence: Factor::HumanPresence.clamp(human_presence),
            visibility: Factor::Visibility.clamp(visibility),
            lighting: Factor::Lighting.clamp(lighting),
            maintenance: Factor::Maintenance.clamp(maintenance),
        }
    }

    /// Build scores by evaluating `measure` once per factor.
    pub fn from_fn(mut measure: impl FnMut(Factor) -> f64) -> Self {
        Self::new(
            measure(Factor::Decay),
            measure(Factor::HumanPresence),
            measure(Factor::Visibility),
            measure(Factor::Lighting),
            measure(Factor::Maintenance),
        )
    }

    /// Score for `factor`.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Decay => self.decay,
            Factor::HumanPresence => self.human_presence,
            Factor::Visibility => self.visibility,
            Factor::Lighting => self.lighting,
            Factor::Maintenance => self.maintenance,
        }
    }

    /// Decay score.
    #[must_use]
    pub const fn decay(&self) -> f64 {
        self.decay
    }

    /// Human presence score.
    #[must_use]
    pub const fn human_presence(&self) -> f64 {
        self.human_presence
    }

    /// Visibility score.
    #[must_use]
    pub const fn visibility(&self) -> f64 {
        self.visibility
    }

    /// Lighting score.
    #[must_use]
    pub const fn lighting(&self) -> f64 {
        self.lighting
    }

    /// Maintenance score.
    #[must_use]
    pub const fn maintenance(&self) -> f64 {
        self.maintenance
    }
}

/// Relative weight of each factor in the overall discomfort score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorWeights {
    /// Weight of [`Factor::Decay`].
    pub decay: f64,
    /// Weight of [`Factor::HumanPresence`].
    pub human_presence: f64,
    /// Weight of [`Factor::Visibility`].
    pub visibility: f64,
    /// Weight of [`Factor::Lighting`].
    pub lighting: f64,
    /// Weight of [`Factor::Maintenance`].
    pub maintenance: f64,
}

impl FactorWeights {
    /// Weight applied to `factor`.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Decay => self.decay,
            Factor::HumanPresence => self.human_presence,
            Factor::Visibility => self.visibility,
            Factor::Lighting => self.lighting,
            Factor::Maintenance => self.maintenance,
        }
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        Factor::ALL.iter().map(|&factor| self.get(factor)).sum()
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            decay: 1.0,
            human_presence: 1.0,
            visibility: 1.0,
            lighting: 0.5,
            maintenance: 0.5,
        }
    }
}
