use crate::common::{MappingPolicy, VbBox, VbDetection};

/// Places a decoded box on the display surface.
///
/// `dest_size` is `(frame_width, frame_height)` of the surface the overlay is
/// drawn on. It is ignored by [`MappingPolicy::DirectOverlay`].
pub fn map_to_display(bbox: &VbBox, policy: MappingPolicy, dest_size: (f32, f32)) -> VbBox {
    match policy {
        MappingPolicy::DirectOverlay => *bbox,
        MappingPolicy::OrientationCorrecting => {
            let (x, y, w, h) = bbox.xy_wh();
            // Quarter turn plus mirror: sensor landscape to portrait.
            VbBox::new(1.0 - y - h, x, h, w).scaled(dest_size.0, dest_size.1)
        }
    }
}

pub fn map_detections(detections: Vec<VbDetection>, policy: MappingPolicy,
                      dest_size: (f32, f32)) -> Vec<VbDetection> {
    if policy == MappingPolicy::DirectOverlay {
        return detections;
    }
    detections
        .into_iter()
        .map(|det| {
            let bbox = map_to_display(&det.bbox, policy, dest_size);
            det.with_bbox(bbox)
        })
        .collect()
}
