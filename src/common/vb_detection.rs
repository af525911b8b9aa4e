use serde::{Deserialize, Serialize};
use crate::common::VbBox;

/// One decoded anchor that cleared the confidence threshold.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct VbDetection {
    pub confidence: f32,
    pub bbox: VbBox,
    pub label: String,
}

impl VbDetection {
    pub fn new(confidence: f32, bbox: VbBox, label: &str) -> Self {
        Self {
            confidence,
            bbox,
            label: label.to_string(),
        }
    }

    /// Replaces the bounding box, keeping confidence and label.
    ///
    /// # Arguments
    ///
    /// * `bbox` - The new box, usually the output of a coordinate mapping.
    ///
    /// # Returns
    ///
    /// A `VbDetection` instance with the updated box.
    pub fn with_bbox(mut self, bbox: VbBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Caption shown next to the box, e.g. `homeplate\n57.0%`.
    pub fn caption(&self) -> String {
        format!("{}\n{:.1}%", self.label, self.confidence * 100.0)
    }
}
