//! Classifier Boundary
//!
//! The image classifier is an external collaborator: it hands the core an
//! ordered list of label/confidence pairs per photographed image. This
//! module applies the confidence gate, normalizes each surviving label, and
//! dedups the result into the per-image unit the pantry counts by.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::normalize;

/// Detections below this confidence are dropped before normalization.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// One classifier-reported candidate object, scoped to one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDetection {
    /// Free-text classifier label (mixed case, often verbose)
    pub label: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

/// Distinct canonical labels detected in one image, in first-seen order.
///
/// Duplicates within the same image collapse to one entry: the pantry counts
/// per-image presence, not per-instance. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDetectionResult {
    labels: Vec<String>,
}

impl ImageDetectionResult {
    /// Build a result from already-canonical labels, collapsing duplicates
    /// while preserving first-seen order.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut result = Self::default();
        for label in labels {
            result.push_distinct(label.into());
        }
        result
    }

    /// Canonical labels in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn push_distinct(&mut self, label: String) {
        if !self.contains(&label) {
            self.labels.push(label);
        }
    }
}

/// Filter one image's raw detections into its canonical label set.
///
/// Applies the confidence gate first, then [`normalize`], then per-image
/// dedup. Discarded labels never fail the image; they are simply omitted.
pub fn filter_image_labels(
    detections: &[RawDetection],
    confidence_threshold: f32,
) -> ImageDetectionResult {
    let mut result = ImageDetectionResult::default();

    for detection in detections {
        if detection.confidence < confidence_threshold {
            debug!(
                "Dropping '{}' below confidence gate ({:.2} < {:.2})",
                detection.label, detection.confidence, confidence_threshold
            );
            continue;
        }

        match normalize(&detection.label) {
            Some(canonical) => result.push_distinct(canonical),
            None => debug!("Discarding non-food label '{}'", detection.label),
        }
    }

    result
}
