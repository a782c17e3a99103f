//! Two-phase location scoring across a small batch.

use rstest::{fixture, rstest};
use streetsense_core::{
    BoundingRegion, Coordinate, FactorScores, FactorWeights, LocationAssessment, assess_location,
    finalize, grid,
};

const TOLERANCE: f64 = 1e-12;

#[fixture]
fn weights() -> FactorWeights {
    FactorWeights::default()
}

fn assessment_with_overall(latitude: f64, overall: f64, weights: &FactorWeights) -> LocationAssessment {
    // Equal factors make the weighted mean equal to that shared value.
    let scores = FactorScores::new(overall, overall, overall, overall, overall);
    assess_location(Coordinate::new(latitude, 0.0), &[scores], Vec::new(), weights)
}

#[rstest]
fn one_heading_location_uses_weighted_mean(weights: FactorWeights) {
    let scores = FactorScores::new(2.0, 1.0, 0.0, 0.0, 0.0);
    let assessment = assess_location(
        Coordinate::new(47.5, -122.4),
        &[scores],
        vec!["47.5000_-122.4000_0.jpg".to_owned()],
        &weights,
    );
    let overall = assessment.overall_discomfort.expect("scored location");
    assert!((overall - 3.0 / 4.0).abs() <= TOLERANCE);
    assert_eq!(assessment.factors, Some(scores));
}

#[rstest]
fn low_and_high_locations_normalize_to_bounds(weights: FactorWeights) {
    let batch = vec![
        assessment_with_overall(0.0, 1.0, &weights),
        assessment_with_overall(1.0, 3.0, &weights),
    ];
    assert_eq!(batch[0].overall_discomfort, Some(1.0));
    assert_eq!(batch[1].overall_discomfort, Some(3.0));

    let records = finalize(batch);

    assert_eq!(records[0].normalized_discomfort, Some(0.0));
    assert_eq!(records[1].normalized_discomfort, Some(1.0));
}

#[rstest]
fn unscored_location_keeps_its_row(weights: FactorWeights) {
    let batch = vec![
        assess_location(Coordinate::new(0.0, 0.0), &[], Vec::new(), &weights),
        assessment_with_overall(1.0, 0.5, &weights),
    ];
    let records = finalize(batch);
    assert_eq!(records.len(), 2);
    assert!(records[0].overall_discomfort.is_none());
    assert!(records[0].normalized_discomfort.is_none());
    assert!(records[0].factors.is_none());
    assert_eq!(records[1].normalized_discomfort, Some(0.5));
}

#[rstest]
fn report_row_count_matches_grid(weights: FactorWeights) {
    let region = BoundingRegion::new(0.0, 0.02, 0.0, 0.01);
    let coordinates = grid(region, 0.01).expect("valid grid");
    let expected = coordinates.len();
    let batch: Vec<_> = coordinates
        .enumerate()
        .map(|(index, coordinate)| {
            if index % 2 == 0 {
                assess_location(coordinate, &[], Vec::new(), &weights)
            } else {
                let scores = FactorScores::new(index as f64 * 0.1, 0.0, 0.0, 0.0, 0.0);
                assess_location(coordinate, &[scores], Vec::new(), &weights)
            }
        })
        .collect();
    let records = finalize(batch);
    assert_eq!(records.len(), expected);
}
