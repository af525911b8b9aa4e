pub mod frame_pipeline;
pub mod inference_process;
#[cfg(feature = "ort")]
pub mod ort_detector;

pub use frame_pipeline::DetectionPipeline;
pub use inference_process::InferenceProcess;
#[cfg(feature = "ort")]
pub use ort_detector::*;
