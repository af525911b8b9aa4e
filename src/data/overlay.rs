use std::sync::Arc;
use std::time::Duration;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use crate::common::VbDetection;
use crate::data::ImageTransformInfo;

/// Everything the display needs for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub frame_id: u64,
    pub detections: Vec<VbDetection>,
    pub inference_time: Duration,
    /// Geometry of the prepare step. With `DirectOverlay` mapping the boxes are
    /// in model space and [`ImageTransformInfo::to_source`] takes them back to the camera frame.
    pub transform: ImageTransformInfo,
}

impl Overlay {
    pub fn new(frame_id: u64, detections: Vec<VbDetection>, inference_time: Duration) -> Self {
        Self {
            frame_id,
            detections,
            inference_time,
            transform: ImageTransformInfo::default(),
        }
    }

    pub fn with_transform(mut self, transform: ImageTransformInfo) -> Self {
        self.transform = transform;
        self
    }

    /// Footer text, e.g. `Inference time: 12.3 ms`.
    pub fn inference_caption(&self) -> String {
        format!("Inference time: {:.1} ms", self.inference_time.as_secs_f64() * 1000.0)
    }
}

/// Most recently drawn overlay.
///
/// Writers replace the whole overlay in one step; readers get an immutable
/// snapshot and never observe a mix of two frames.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    current: Arc<RwLock<Arc<Overlay>>>,
}

impl OverlayState {
    pub fn new() -> Self {
        Default::default()
    }

    /// Swaps in `overlay`, returning the one it replaced.
    pub fn publish(&self, overlay: Overlay) -> Arc<Overlay> {
        let next = Arc::new(overlay);
        std::mem::replace(&mut *self.current.write(), next)
    }

    pub fn snapshot(&self) -> Arc<Overlay> {
        Arc::clone(&self.current.read())
    }

    /// Drops every box, e.g. when the camera stops.
    pub fn clear(&self) {
        self.publish(Overlay::default());
    }
}
