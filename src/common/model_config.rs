use serde::{Deserialize, Serialize};
use crate::common::inference_device::InferenceDevice;

/// Where the model lives and how it should be executed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights_path: String,
    pub ort_lib_path: String,
    pub labels_path: String,
    pub inference_device: InferenceDevice,
    pub width: u32,
    pub height: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: String::new(),
            ort_lib_path: String::new(),
            labels_path: String::new(),
            inference_device: InferenceDevice::CPU,
            width: 640,
            height: 640,
        }
    }
}

impl ModelConfig {
    pub fn new(weights_path: String, ort_lib_path: String, labels_path: String,
               inference_device: InferenceDevice, width: u32, height: u32) -> Self {
        Self {
            weights_path,
            ort_lib_path,
            labels_path,
            inference_device,
            width,
            height,
        }
    }

    pub fn summary(&self) -> String {
        format!("Weights File Path: {}\n\
        Labels Path: {}\n\
        OnnxRuntime Lib Path: {}\n\
        Inference Device: {}\n\
        Model Input Resolution: {}x{}",
                self.weights_path, self.labels_path, self.ort_lib_path,
                self.inference_device, self.width, self.height)
    }
}
