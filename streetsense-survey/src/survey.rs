//! Concurrent per-location scoring and the normalization barrier.

use std::sync::Arc;

use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use streetsense_core::{
    CapturedImage, Coordinate, DetectionError, Detector, ExtractionError, FactorScores,
    FeatureExtractor, FetchError, Heading, ImageScorer, ImageSink, ImageSource,
    LocationAssessment, assess_location, finalize,
};
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};

use crate::{SurveyConfig, SurveyReport, SurveySummary};

/// Why one heading's image did not contribute a score.
#[derive(Debug, Error)]
enum ImageFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("detection failed: {0}")]
    Detect(#[from] DetectionError),
    #[error("feature extraction failed: {0}")]
    Extract(#[from] ExtractionError),
    #[error("scoring worker failed: {0}")]
    Worker(#[from] JoinError),
}

struct HeadingOutcome {
    fetched: bool,
    image_id: Option<String>,
    scores: Result<FactorScores, ImageFailure>,
}

struct CountedAssessment {
    assessment: LocationAssessment,
    fetched: usize,
}

/// Scores locations from injected imagery, detection, extraction and
/// scoring capabilities.
///
/// The capabilities are constructed once by the caller and shared by every
/// location task for the lifetime of the survey.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use streetsense_core::test_support::{AcceptingExtractor, FnScorer, StubDetector, StubImageSource};
/// use streetsense_core::{Coordinate, FactorScores};
/// use streetsense_survey::Survey;
///
/// let survey = Survey::new(
///     Arc::new(StubImageSource::uniform(8, 128)),
///     Arc::new(StubDetector::empty()),
///     Arc::new(AcceptingExtractor),
///     Arc::new(FnScorer::fixed(FactorScores::new(1.0, 1.0, 1.0, 1.0, 1.0))),
/// );
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_all()
///     .build()
///     .expect("runtime");
/// let report = runtime.block_on(survey.run([Coordinate::new(47.5, -122.4)]));
/// assert_eq!(report.records[0].overall_discomfort, Some(1.0));
/// assert_eq!(report.records[0].normalized_discomfort, Some(0.5));
/// ```
pub struct Survey {
    source: Arc<dyn ImageSource>,
    detector: Arc<dyn Detector>,
    extractor: Arc<dyn FeatureExtractor>,
    scorer: Arc<dyn ImageScorer>,
    sink: Option<Arc<dyn ImageSink>>,
    config: SurveyConfig,
}

impl std::fmt::Debug for Survey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Survey")
            .field("persisting", &self.sink.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Survey {
    /// Build a survey with default configuration and no image persistence.
    #[must_use]
    pub fn new(
        source: Arc<dyn ImageSource>,
        detector: Arc<dyn Detector>,
        extractor: Arc<dyn FeatureExtractor>,
        scorer: Arc<dyn ImageScorer>,
    ) -> Self {
        Self {
            source,
            detector,
            extractor,
            scorer,
            sink: None,
            config: SurveyConfig::default(),
        }
    }

    /// Persist every fetched image through `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ImageSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: SurveyConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &SurveyConfig {
        &self.config
    }

    /// Assess one location from its four headings.
    ///
    /// Headings are captured concurrently. A failed heading is logged and
    /// shrinks the averaging set; when all four fail the assessment carries
    /// no score.
    pub async fn assess(&self, coordinate: Coordinate) -> LocationAssessment {
        self.assess_counted(coordinate).await.assessment
    }

    /// Assess every coordinate, then normalize the batch.
    ///
    /// Up to `concurrency` locations are in flight at once. Records come back
    /// in input order whatever order the locations finish in. Normalization
    /// starts only after the last location is assessed.
    pub async fn run<I>(&self, coordinates: I) -> SurveyReport
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let coordinates: Vec<Coordinate> = coordinates.into_iter().collect();
        let total = coordinates.len();
        info!(
            "surveying {total} locations, {} at a time",
            self.config.concurrency
        );
        let assessed: Vec<CountedAssessment> = stream::iter(coordinates.into_iter().enumerate())
            .map(|(index, coordinate)| async move {
                let counted = self.assess_counted(coordinate).await;
                info!("processed location {}/{total} {coordinate}", index + 1);
                counted
            })
            .buffered(self.config.concurrency.get())
            .collect()
            .await;

        let mut summary = SurveySummary {
            locations: total,
            ..SurveySummary::default()
        };
        let mut assessments = Vec::with_capacity(total);
        for CountedAssessment {
            assessment,
            fetched,
        } in assessed
        {
            summary.images_fetched += fetched;
            summary.images_scored += assessment.samples;
            if assessment.is_scored() {
                summary.scored += 1;
            } else {
                summary.unscored += 1;
            }
            assessments.push(assessment);
        }
        info!(
            "survey complete: {} scored, {} unscored, {} of {} fetched images scored",
            summary.scored, summary.unscored, summary.images_scored, summary.images_fetched
        );
        SurveyReport {
            records: finalize(assessments),
            summary,
        }
    }

    async fn assess_counted(&self, coordinate: Coordinate) -> CountedAssessment {
        let outcomes = join_all(
            Heading::ALL
                .into_iter()
                .map(|heading| self.capture_heading(coordinate, heading)),
        )
        .await;

        let mut fetched = 0;
        let mut scores = Vec::with_capacity(Heading::ALL.len());
        let mut image_ids = Vec::new();
        for (heading, outcome) in Heading::ALL.into_iter().zip(outcomes) {
            if outcome.fetched {
                fetched += 1;
            }
            image_ids.extend(outcome.image_id);
            match outcome.scores {
                Ok(score) => scores.push(score),
                Err(failure) => warn!("{coordinate} heading {heading}: {failure}"),
            }
        }

        let assessment = assess_location(coordinate, &scores, image_ids, &self.config.weights);
        match assessment.overall_discomfort {
            Some(overall) => debug!(
                "{coordinate}: overall discomfort {overall:.4} from {} images",
                assessment.samples
            ),
            None => warn!("{coordinate}: no images available"),
        }
        CountedAssessment {
            assessment,
            fetched,
        }
    }

    async fn capture_heading(&self, coordinate: Coordinate, heading: Heading) -> HeadingOutcome {
        let image = match self.source.fetch(coordinate, heading).await {
            Ok(image) => Arc::new(image),
            Err(err) => {
                return HeadingOutcome {
                    fetched: false,
                    image_id: None,
                    scores: Err(err.into()),
                };
            }
        };
        let image_id = self.persist(&image).await;
        let scores = self.score_image(image).await;
        HeadingOutcome {
            fetched: true,
            image_id,
            scores,
        }
    }

    async fn persist(&self, image: &Arc<CapturedImage>) -> Option<String> {
        let sink = Arc::clone(self.sink.as_ref()?);
        let captured = Arc::clone(image);
        match spawn_blocking(move || sink.persist(&captured)).await {
            Ok(Ok(identifier)) => Some(identifier),
            Ok(Err(err)) => {
                let cause = std::error::Error::source(&err)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                warn!("{err}: {cause}");
                None
            }
            Err(err) => {
                warn!("image persistence worker failed: {err}");
                None
            }
        }
    }

    async fn score_image(&self, image: Arc<CapturedImage>) -> Result<FactorScores, ImageFailure> {
        let detections = self.detector.detect(&image).await?;
        let extractor = Arc::clone(&self.extractor);
        let scorer = Arc::clone(&self.scorer);
        spawn_blocking(move || -> Result<FactorScores, ImageFailure> {
            extractor.extract(&image)?;
            Ok(scorer.score(&image, &detections))
        })
        .await?
    }
}
