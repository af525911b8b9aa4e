use std::thread::JoinHandle;
use crate::data::{detection_channels, DetectionState, SendState};
use crate::detection_runners::DetectionPipeline;

/// Worker loop: pulls frames until every sender is gone, runs them through
/// `pipeline` and forwards the newest overlay to the display side.
///
/// Returns the number of frames that produced an overlay.
pub fn detector_worker(mut pipeline: DetectionPipeline, detection_state: DetectionState) -> u64 {
    let mut published = 0u64;

    loop {
        // MESSAGE LOOP STARTS HERE
        let frame = match detection_state.frame_rx.recv() {
            Ok(msg) => msg,
            Err(_) => {
                log::info!("Frame channel closed, stopping detection worker");
                break;
            }
        };

        let Some(overlay) = pipeline.run_frame(&frame) else {
            continue;
        };
        published += 1;

        detection_state.publish_overlay((*overlay).clone());
    }

    log::info!("Detection worker done: {} overlays, {} dropped frames",
        published, pipeline.dropped_frames());
    published
}

/// Starts [`detector_worker`] on its own thread and returns the capture/display handles.
pub fn spawn_detector(pipeline: DetectionPipeline) -> std::io::Result<(SendState, JoinHandle<u64>)> {
    let (send_state, detection_state) = detection_channels();
    let handle = std::thread::Builder::new()
        .name("vb-detector".to_string())
        .spawn(move || detector_worker(pipeline, detection_state))?;
    Ok((send_state, handle))
}
