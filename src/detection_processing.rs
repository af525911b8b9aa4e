//! Turns the raw detection head output into boxes.

use rayon::prelude::*;
use crate::common::{CoordinateSpace, VbBox, VbDetection};
use crate::data::{DecodeConfig, RawOutputTensor, DETECTION_CHANNELS};
use crate::error::{Result, VbError};

/// Decodes every anchor whose confidence is strictly above the threshold.
///
/// No suppression, sorting or capping is applied: the result holds one
/// detection per surviving anchor, in anchor order. With `Normalized` input
/// the box channels are multiplied by `image_size` (width scales cx and w,
/// height scales cy and h); with `RawPixel` input they are used as-is.
pub fn decode(tensor: &RawOutputTensor, cfg: &DecodeConfig, image_size: (f32, f32),
              space: CoordinateSpace) -> Result<Vec<VbDetection>> {
    let expected = cfg.expected_len();
    if tensor.len() != expected {
        return Err(VbError::Shape { expected, actual: tensor.len() });
    }
    if cfg.channel_count < DETECTION_CHANNELS {
        return Err(VbError::Shape {
            expected: DETECTION_CHANNELS * cfg.anchor_count,
            actual: tensor.len(),
        });
    }

    let tensor = if tensor.channels() == cfg.channel_count {
        tensor.clone()
    } else {
        tensor.reshaped(cfg.channel_count, cfg.anchor_count)?
    };

    let (sx, sy) = match space {
        CoordinateSpace::RawPixel => (1.0, 1.0),
        CoordinateSpace::Normalized => image_size,
    };
    let threshold = cfg.confidence_threshold;

    let detections: Vec<VbDetection> = (0..cfg.anchor_count)
        .into_par_iter()
        .filter_map(|i| {
            let (cx, cy, w, h, conf) = tensor.anchor(i);
            if conf <= threshold {
                return None;
            }
            let bbox = VbBox::from_cxcy_wh(cx * sx, cy * sy, w * sx, h * sy);
            Some(VbDetection::new(conf, bbox, &cfg.label))
        })
        .collect();

    log::debug!("decoded {} of {} anchors above {}", detections.len(), cfg.anchor_count, threshold);

    Ok(detections)
}
