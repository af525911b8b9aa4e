mod decode_config;
mod filesystem_access;
mod label_palette;
mod overlay;
mod pipeline_config;
mod prepare_config;
mod raw_output_tensor;
mod time_calc;
pub mod send_channels;

pub use decode_config::*;
pub use filesystem_access::FsAccess;
pub use label_palette::{LabelColour, LabelPalette};
pub use overlay::{Overlay, OverlayState};
pub use pipeline_config::{PipelineConfig, CONFIG_FILE_NAME};
pub use prepare_config::{ImageTransformInfo, PrepareConfig, MODEL_INPUT_SIZE};
pub use raw_output_tensor::{widen_f16, Channel, InferenceOutput, RawOutputTensor};
pub use send_channels::{detection_channels, DetectionState, SendState};
pub use time_calc::TimeCalc;
