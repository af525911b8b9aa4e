use serde::{Deserialize, Serialize};

/// Channels the decoder reads: cx, cy, w, h, confidence.
pub const DETECTION_CHANNELS: usize = 5;
/// Anchor slots in a 640x640 YOLO head (80x80 + 40x40 + 20x20).
pub const DEFAULT_ANCHORS: usize = 8400;
pub const DEFAULT_LABEL: &str = "homeplate";

/// Per-call decoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Anchors are kept only when their confidence is strictly greater.
    pub confidence_threshold: f32,
    pub anchor_count: usize,
    pub channel_count: usize,
    /// The model is single-class, every detection carries this label.
    pub label: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.03,
            anchor_count: DEFAULT_ANCHORS,
            channel_count: DETECTION_CHANNELS,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl DecodeConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_threshold(mut self, x: f32) -> Self {
        self.confidence_threshold = x;
        self
    }

    pub fn with_anchors(mut self, n: usize) -> Self {
        self.anchor_count = n;
        self
    }

    pub fn with_channels(mut self, n: usize) -> Self {
        self.channel_count = n;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Total element count a tensor must have for this configuration.
    pub fn expected_len(&self) -> usize {
        self.channel_count * self.anchor_count
    }
}
