//! Object detection over HTTP.
//!
//! [`HttpDetector`] posts each capture as a JPEG to a detection service and
//! reads back labelled boxes. The service is expected to answer with
//!
//! ```json
//! {"detections": [{"label": "person", "confidence": 0.91, "box": [12.0, 40.0, 88.0, 210.0]}]}
//! ```
//!
//! or `{"error": "..."}` when it rejects the image.

mod client;
mod wire;

pub use client::{DEFAULT_DETECTOR_USER_AGENT, HttpDetector, HttpDetectorConfig};
