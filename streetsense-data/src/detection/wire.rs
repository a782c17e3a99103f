//! Response types for the detection service.

use serde::Deserialize;
use streetsense_core::{BoundingBox, Detection, DetectionResult};

/// Detection service response.
///
/// A successful answer carries `detections`; a rejection carries `error`.
#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    /// Labelled boxes, empty when nothing was found.
    #[serde(default)]
    pub detections: Vec<WireDetection>,
    /// Rejection reason.
    #[serde(default)]
    pub error: Option<String>,
}

/// One labelled box as sent on the wire.
#[derive(Debug, Deserialize)]
pub struct WireDetection {
    /// Class name, such as `person`.
    pub label: String,
    /// Detector confidence in `0..=1`.
    pub confidence: f32,
    /// `[x_min, y_min, x_max, y_max]` in pixels.
    #[serde(rename = "box")]
    pub bbox: [f32; 4],
}

impl From<WireDetection> for Detection {
    fn from(wire: WireDetection) -> Self {
        let [x_min, y_min, x_max, y_max] = wire.bbox;
        Self::new(
            wire.label,
            wire.confidence,
            BoundingBox {
                x_min,
                y_min,
                x_max,
                y_max,
            },
        )
    }
}

impl DetectResponse {
    /// Split the response into detections or the service's rejection.
    pub fn into_result(self) -> Result<DetectionResult, String> {
        match self.error {
            Some(message) => Err(message),
            None => Ok(self.detections.into_iter().map(Detection::from).collect()),
        }
    }
}
