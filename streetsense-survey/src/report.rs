//! Survey results.

use streetsense_core::LocationRecord;

/// Counts describing a finished survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveySummary {
    /// Locations surveyed, scored or not.
    pub locations: usize,
    /// Locations with at least one scored image.
    pub scored: usize,
    /// Locations where no image could be scored.
    pub unscored: usize,
    /// Images fetched successfully.
    pub images_fetched: usize,
    /// Images that contributed a score.
    pub images_scored: usize,
}

/// Normalized records in grid order plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    /// One record per surveyed location.
    pub records: Vec<LocationRecord>,
    /// Run counters.
    pub summary: SurveySummary,
}
