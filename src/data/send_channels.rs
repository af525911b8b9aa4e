use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use crate::common::VbFrame;
use crate::data::Overlay;

/// Worker side: receives frames, sends overlays.
#[derive(Debug)]
pub struct DetectionState {
    pub frame_rx: Receiver<Box<VbFrame>>,
    pub overlay_tx: Sender<Box<Overlay>>,
    // Lets the worker evict an overlay the display never picked up.
    stale_rx: Receiver<Box<Overlay>>,
}

/// Capture/display side: offers frames, receives overlays.
#[derive(Debug)]
pub struct SendState {
    pub frame_tx: Sender<Box<VbFrame>>,
    pub overlay_rx: Receiver<Box<Overlay>>,
}

/// Frames go through a rendezvous channel: a frame is only taken while the
/// worker waits in `recv`, otherwise it is dropped. Overlays go through a
/// single slot that always holds the newest one.
pub fn detection_channels() -> (SendState, DetectionState) {
    let (frame_tx, frame_rx) = bounded(0);
    let (overlay_tx, overlay_rx) = bounded(1);
    (
        SendState { frame_tx, overlay_rx: overlay_rx.clone() },
        DetectionState { frame_rx, overlay_tx, stale_rx: overlay_rx },
    )
}

impl SendState {
    /// Hands a frame to the worker without blocking.
    ///
    /// Returns `false` when the frame was dropped, either because the worker
    /// is still busy with an earlier frame or because it has shut down.
    pub fn offer_frame(&self, frame: VbFrame) -> bool {
        match self.frame_tx.try_send(Box::new(frame)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("worker busy, dropping frame");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                log::warn!("detection worker has stopped, dropping frame");
                false
            }
        }
    }

    /// Overlay waiting in the slot, if the worker published one since the last call.
    pub fn latest_overlay(&self) -> Option<Box<Overlay>> {
        self.overlay_rx.try_iter().last()
    }
}

impl DetectionState {
    /// Puts `overlay` in the slot, evicting an unread older one.
    pub fn publish_overlay(&self, overlay: Overlay) {
        let mut overlay = Box::new(overlay);
        loop {
            match self.overlay_tx.try_send(overlay) {
                Ok(()) => return,
                Err(TrySendError::Full(back)) => {
                    if let Ok(stale) = self.stale_rx.try_recv() {
                        log::trace!("replacing unread overlay for frame {}", stale.frame_id);
                    }
                    overlay = back;
                }
                // The slot keeps a receiver of its own, so this only happens on teardown.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}
