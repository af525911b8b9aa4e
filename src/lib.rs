mod utils;
mod error;
pub mod common;
pub mod coordinate_mapping;
pub mod data;
pub mod detection_processing;
pub mod detection_runners;
pub mod detectors;
pub mod image_ops;

use std::path::Path;
use std::time::Instant;
use anyhow::Context;
use crate::common::{MappingPolicy, VbDetection, VbFrame};
use crate::data::{InferenceOutput, PipelineConfig};
use crate::detection_runners::{DetectionPipeline, InferenceProcess};

pub use crate::coordinate_mapping::{map_detections, map_to_display};
pub use crate::detection_processing::decode;
pub use crate::error::{Result, VbError};
pub use crate::image_ops::prepare;

/// Builds a pipeline around `engine`, reading the class label from the
/// model's labels file when one is configured.
pub fn init_pipeline(mut config: PipelineConfig, engine: Box<dyn InferenceProcess + Send>) -> anyhow::Result<DetectionPipeline> {
    config.validate()?;

    if !config.model.labels_path.is_empty() {
        let labels_path = Path::new(&config.model.labels_path);
        let labels = utils::file_to_vec(labels_path)
            .with_context(|| format!("failed to read labels file {}", labels_path.display()))?;
        match labels.first() {
            Some(label) => config.decode.label = label.clone(),
            None => anyhow::bail!("labels file {} is empty", labels_path.display()),
        }
        if labels.len() > 1 {
            log::warn!("Labels file lists {} classes, only '{}' is used", labels.len(), config.decode.label);
        }
    }

    log::info!("Initializing detection pipeline with ({}) inference\n{}", engine.name(), config.summary());
    Ok(DetectionPipeline::new(config, engine))
}

/// Builds a pipeline backed by ONNX Runtime.
#[cfg(feature = "ort")]
pub fn init_ort_pipeline(config: PipelineConfig) -> anyhow::Result<DetectionPipeline> {
    let engine = detection_runners::OrtInference::new(&config.model)?;
    init_pipeline(config, Box::new(engine))
}

/// One-shot detection on a single frame, without the shared overlay.
pub fn run_detection(pipeline: &mut DetectionPipeline, frame: &VbFrame) -> Result<Vec<VbDetection>> {
    let now = Instant::now();

    let overlay = pipeline.process(frame)?;

    log::debug!("Processing time: {:?}", now.elapsed());

    Ok(overlay.detections)
}

/// Decodes an already computed head output with the pipeline settings, skipping
/// preparation and inference.
pub fn decode_output(config: &PipelineConfig, output: &InferenceOutput,
                     frame_size: (f32, f32)) -> Result<Vec<VbDetection>> {
    // The orientation-correcting mapper takes unit boxes.
    let image_size = match config.mapping {
        MappingPolicy::OrientationCorrecting => config.decode_image_size.unwrap_or((1.0, 1.0)),
        MappingPolicy::DirectOverlay => config.decode_image_size.unwrap_or(frame_size),
    };
    let detections = decode(&output.view(), &config.decode, image_size, config.space)?;
    let dest_size = config.display_size.unwrap_or(frame_size);
    Ok(map_detections(detections, config.mapping, dest_size))
}
