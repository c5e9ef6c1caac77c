//! core::detect
//!
//! Filtering of detector output down to recognized recyclable categories.
//!
//! The visual detector is an external collaborator that yields a list of
//! `(label, confidence)` pairs; this module only intersects those labels
//! against the fixed recognized-category set before rules are resolved
//! per distinct label.

use serde::{Deserialize, Serialize};

/// The recognized recyclable categories (COCO class names).
pub const RECYCLABLE_LABELS: [&str; 4] = ["bottle", "cup", "wine glass", "vase"];

/// One detection from the external classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Detected class label.
    pub label: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Whether a label names a recognized recyclable category.
pub fn is_recyclable(label: &str) -> bool {
    RECYCLABLE_LABELS.contains(&label)
}

/// Keep only the detections whose label is a recognized category,
/// preserving order.
pub fn filter_recyclable(detections: &[Detection]) -> Vec<&Detection> {
    detections
        .iter()
        .filter(|d| is_recyclable(&d.label))
        .collect()
}
