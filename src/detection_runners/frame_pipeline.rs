use std::sync::Arc;
use std::time::{Duration, Instant};
use crate::common::VbFrame;
use crate::data::{Overlay, OverlayState, PipelineConfig, TimeCalc};
use crate::detection_runners::inference_process::InferenceProcess;
use crate::error::Result;
use crate::{image_ops, utils};

const STAGE_PREPARE: usize = 0;
const STAGE_INFERENCE: usize = 1;
const STAGE_DECODE: usize = 2;

/// Prepare, infer, decode and map one frame at a time.
pub struct DetectionPipeline {
    config: PipelineConfig,
    engine: Box<dyn InferenceProcess + Send>,
    overlay: OverlayState,
    times: TimeCalc,
    next_frame_id: u64,
    dropped: u64,
}

impl DetectionPipeline {
    pub fn new(config: PipelineConfig, engine: Box<dyn InferenceProcess + Send>) -> Self {
        Self::with_overlay(config, engine, OverlayState::new())
    }

    /// Publishes into an overlay state shared with the display.
    pub fn with_overlay(config: PipelineConfig, engine: Box<dyn InferenceProcess + Send>,
                        overlay: OverlayState) -> Self {
        Self {
            config,
            engine,
            overlay,
            times: TimeCalc::default(),
            next_frame_id: 0,
            dropped: 0,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub fn times(&self) -> &TimeCalc {
        &self.times
    }

    /// Frames lost to conversion, shape or inference errors.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped
    }

    /// Runs the whole chain on `frame` without touching the shared overlay.
    pub fn process(&mut self, frame: &VbFrame) -> Result<Overlay> {
        let frame_id = self.next_frame_id;
        self.next_frame_id += 1;

        let start = Instant::now();
        let mut elapsed = Duration::ZERO;

        let (prepared, transform) = image_ops::prepare(frame, &self.config.prepare)?;
        let t_pre = start.elapsed();
        elapsed = utils::trace("TIME", "Preprocessing input", start, elapsed);

        let output = self.engine.infer(&prepared)?;
        let inference_time = start.elapsed() - t_pre;
        elapsed = utils::trace("TIME", "Inference", start, elapsed);

        let frame_size = (frame.width() as f32, frame.height() as f32);
        let detections = crate::decode_output(&self.config, &output, frame_size)?;
        let t_post = start.elapsed() - t_pre - inference_time;
        utils::trace("TIME", "Postprocessing", start, elapsed);

        self.times.add_or_push(STAGE_PREPARE, t_pre);
        self.times.add_or_push(STAGE_INFERENCE, inference_time);
        self.times.add_or_push(STAGE_DECODE, t_post);

        if !detections.is_empty() {
            log::debug!("frame {}: {} detections", frame_id, detections.len());
        }

        Ok(Overlay::new(frame_id, detections, inference_time).with_transform(transform))
    }

    /// Processes `frame` and replaces the shared overlay with the result.
    ///
    /// A failing frame is logged and skipped; the previous overlay stays up.
    pub fn run_frame(&mut self, frame: &VbFrame) -> Option<Arc<Overlay>> {
        match self.process(frame) {
            Ok(overlay) => {
                self.overlay.publish(overlay);
                Some(self.overlay.snapshot())
            }
            Err(err) => {
                self.dropped += 1;
                if err.is_frame_local() {
                    log::warn!("Dropping frame ({}x{}) from {}: {}",
                        frame.width(), frame.height(), self.engine.name(), err);
                } else {
                    log::error!("Dropping frame ({}x{}) from {}: {}",
                        frame.width(), frame.height(), self.engine.name(), err);
                }
                None
            }
        }
    }

    /// Average prepare / inference / decode durations so far.
    pub fn stage_averages(&self) -> [Duration; 3] {
        [STAGE_PREPARE, STAGE_INFERENCE, STAGE_DECODE]
            .map(|i| self.times.avg_i(i).unwrap_or_default())
    }
}

impl std::fmt::Debug for DetectionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionPipeline")
            .field("engine", &self.engine.name())
            .field("config", &self.config)
            .field("next_frame_id", &self.next_frame_id)
            .field("dropped", &self.dropped)
            .finish()
    }
}
