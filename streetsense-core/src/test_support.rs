//! Deterministic capability doubles used by unit and behaviour tests.
//!
//! None of these touch the network or a model, so pipelines can be exercised
//! with synthetic pixels and detections.

use std::sync::Mutex;

use async_trait::async_trait;
use image::{Rgb, RgbImage};

use crate::{
    CapturedImage, Coordinate, DetectionError, DetectionResult, Detector, ExtractionError,
    FactorScores, FeatureExtractor, FeatureVector, FetchError, Heading, ImageScorer, ImageSink,
    ImageSource, SinkError,
};

type FetchFn = dyn Fn(Coordinate, Heading) -> Result<RgbImage, FetchError> + Send + Sync;

/// `ImageSource` answering from a closure.
pub struct StubImageSource {
    respond: Box<FetchFn>,
}

impl std::fmt::Debug for StubImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubImageSource").finish_non_exhaustive()
    }
}

impl StubImageSource {
    /// Answer every request with the result of `respond`.
    pub fn from_fn<F>(respond: F) -> Self
    where
        F: Fn(Coordinate, Heading) -> Result<RgbImage, FetchError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
        }
    }

    /// Answer every request with a uniformly coloured image.
    #[must_use]
    pub fn uniform(size: u32, value: u8) -> Self {
        Self::from_fn(move |_, _| Ok(RgbImage::from_pixel(size, size, Rgb([value; 3]))))
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn failing(error: FetchError) -> Self {
        Self::from_fn(move |_, _| Err(error.clone()))
    }
}

#[async_trait]
impl ImageSource for StubImageSource {
    async fn fetch(
        &self,
        coordinate: Coordinate,
        heading: Heading,
    ) -> Result<CapturedImage, FetchError> {
        (self.respond)(coordinate, heading)
            .map(|pixels| CapturedImage::new(coordinate, heading, pixels))
    }
}

/// `Detector` returning a fixed answer.
#[derive(Debug, Clone)]
pub struct StubDetector {
    response: Result<DetectionResult, DetectionError>,
}

impl StubDetector {
    /// Report `detections` for every image.
    #[must_use]
    pub const fn with_detections(detections: DetectionResult) -> Self {
        Self {
            response: Ok(detections),
        }
    }

    /// Report nothing for every image.
    #[must_use]
    pub const fn empty() -> Self {
        Self::with_detections(DetectionResult::empty())
    }

    /// Fail every request with `error`.
    #[must_use]
    pub const fn with_error(error: DetectionError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl Detector for StubDetector {
    async fn detect(&self, _image: &CapturedImage) -> Result<DetectionResult, DetectionError> {
        self.response.clone()
    }
}

/// `FeatureExtractor` that accepts any non-empty image.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptingExtractor;

impl FeatureExtractor for AcceptingExtractor {
    fn extract(&self, image: &CapturedImage) -> Result<FeatureVector, ExtractionError> {
        let (width, height) = image.pixels().dimensions();
        if width == 0 || height == 0 {
            return Err(ExtractionError::EmptyImage { width, height });
        }
        Ok(FeatureVector {
            shape: [0, 0, 0],
            values: Vec::new(),
        })
    }
}

type ScoreFn = dyn Fn(&CapturedImage) -> FactorScores + Send + Sync;

/// `ImageScorer` computing scores from a closure over the capture.
pub struct FnScorer {
    score: Box<ScoreFn>,
}

impl std::fmt::Debug for FnScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnScorer").finish_non_exhaustive()
    }
}

impl FnScorer {
    /// Score each capture with `score`.
    pub fn new<F>(score: F) -> Self
    where
        F: Fn(&CapturedImage) -> FactorScores + Send + Sync + 'static,
    {
        Self {
            score: Box::new(score),
        }
    }

    /// Return `scores` for every capture.
    #[must_use]
    pub fn fixed(scores: FactorScores) -> Self {
        Self::new(move |_| scores)
    }
}

impl ImageScorer for FnScorer {
    fn score(&self, image: &CapturedImage, _detections: &DetectionResult) -> FactorScores {
        (self.score)(image)
    }
}

/// `ImageSink` recording identifiers in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    stored: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Identifiers stored so far, in arrival order.
    #[must_use]
    pub fn stored(&self) -> Vec<String> {
        self.stored
            .lock()
            .map(|stored| stored.clone())
            .unwrap_or_default()
    }
}

impl ImageSink for MemorySink {
    fn persist(&self, image: &CapturedImage) -> Result<String, SinkError> {
        let identifier = image.file_name();
        let mut stored = self.stored.lock().map_err(|err| SinkError::Persist {
            identifier: identifier.clone(),
            source: err.to_string().into(),
        })?;
        stored.push(identifier.clone());
        Ok(identifier)
    }
}
