use vb_detect::common::{MappingPolicy, VbBox, VbDetection};
use vb_detect::{map_detections, map_to_display};

use fixtures::assert_close;

#[test]
fn orientation_correcting_turns_and_scales() {
    let bbox = VbBox::new(0.2, 0.3, 0.1, 0.4);

    let out = map_to_display(&bbox, MappingPolicy::OrientationCorrecting, (480.0, 640.0));

    assert_close(out.x, 144.0, 1e-3);
    assert_close(out.y, 128.0, 1e-3);
    assert_close(out.w, 192.0, 1e-3);
    assert_close(out.h, 64.0, 1e-3);
}

#[test]
fn full_frame_stays_full_frame() {
    let out = map_to_display(&VbBox::new(0.0, 0.0, 1.0, 1.0),
                             MappingPolicy::OrientationCorrecting, (480.0, 640.0));

    assert_eq!(out, VbBox::new(0.0, 0.0, 480.0, 640.0));
}

#[test]
fn direct_overlay_is_identity() {
    let bbox = VbBox::new(270.0, 295.0, 100.0, 50.0);

    for dest in [(640.0, 640.0), (1.0, 1.0), (0.0, 0.0)] {
        assert_eq!(map_to_display(&bbox, MappingPolicy::DirectOverlay, dest), bbox);
    }
}

#[test]
fn mapping_keeps_confidence_label_and_order() {
    let detections = vec![
        VbDetection::new(0.9, VbBox::new(0.2, 0.3, 0.1, 0.4), "homeplate"),
        VbDetection::new(0.1, VbBox::new(0.0, 0.0, 0.5, 0.5), "homeplate"),
    ];

    let mapped = map_detections(detections.clone(), MappingPolicy::OrientationCorrecting, (480.0, 640.0));

    assert_eq!(mapped.len(), 2);
    for (before, after) in detections.iter().zip(&mapped) {
        assert_eq!(before.confidence, after.confidence);
        assert_eq!(before.label, after.label);
    }
    assert_close(mapped[0].bbox.x, 144.0, 1e-3);
    assert_close(mapped[1].bbox.x, 240.0, 1e-3);
    assert_close(mapped[1].bbox.h, 320.0, 1e-3);

    let direct = map_detections(detections.clone(), MappingPolicy::DirectOverlay, (480.0, 640.0));
    assert_eq!(direct, detections);
}
