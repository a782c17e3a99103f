//! Object detections reported for a single image.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Left edge.
    pub x_min: f32,
    /// Top edge.
    pub y_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Bottom edge.
    pub y_max: f32,
}

/// One labelled object found by a detector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// Class label, e.g. `"person"` or `"bottle"`.
    pub label: String,
    /// Detector confidence in `0.0..=1.0`.
    pub confidence: f32,
    /// Location of the object in the image.
    pub bbox: BoundingBox,
}

impl Detection {
    /// Build a detection.
    pub fn new(label: impl Into<String>, confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}

/// Ordered detections for one image, as produced by a [`Detector`](crate::Detector).
///
/// # Examples
///
/// ```
/// use streetsense_core::{BoundingBox, Detection, DetectionResult};
///
/// let result = DetectionResult::from(vec![
///     Detection::new("person", 0.9, BoundingBox::default()),
///     Detection::new("bottle", 0.6, BoundingBox::default()),
/// ]);
/// assert_eq!(result.count_label("person"), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectionResult {
    detections: Vec<Detection>,
}

impl DetectionResult {
    /// An empty result.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            detections: Vec::new(),
        }
    }

    /// Iterate detections in detector order.
    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.detections.iter()
    }

    /// Number of detections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    /// Report whether nothing was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Count detections whose label equals `label`.
    #[must_use]
    pub fn count_label(&self, label: &str) -> usize {
        self.count_matching(|candidate| candidate == label)
    }

    /// Count detections whose label satisfies `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&str) -> bool) -> usize {
        self.detections
            .iter()
            .filter(|detection| predicate(&detection.label))
            .count()
    }
}

impl From<Vec<Detection>> for DetectionResult {
    fn from(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl FromIterator<Detection> for DetectionResult {
    fn from_iter<I: IntoIterator<Item = Detection>>(iter: I) -> Self {
        Self {
            detections: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DetectionResult {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
