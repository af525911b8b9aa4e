use anyhow::Result;
use ort::{
    execution_providers::{ExecutionProvider,
                          CPUExecutionProvider,
                          CUDAExecutionProvider,
                          CoreMLExecutionProvider},
    session::builder::{GraphOptimizationLevel, SessionBuilder},
    session::Session,
    value::Value,
};
use crate::common::{InferenceDevice, ModelConfig, VbFrame};
use crate::data::{InferenceOutput, RawOutputTensor};
use crate::detection_runners::inference_process::InferenceProcess;
use crate::error::VbError;
use crate::image_ops;

/// ONNX Runtime session running a single-class YOLO head.
#[derive(Debug)]
pub struct OrtInference {
    session: Session,
    device: InferenceDevice,
    input_name: String,
    output_name: String,
    model_width: u32,
    model_height: u32,
}

impl OrtInference {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        if !config.ort_lib_path.is_empty() {
            // Dynamically load the library from given path
            if let Err(e) = ort::init_from(&config.ort_lib_path).commit() {
                anyhow::bail!("Failed to commit ORT from {}: {:?}", config.ort_lib_path, e);
            }
        }

        let mut builder = Session::builder()?;

        let mut device = config.inference_device;
        match device {
            InferenceDevice::CUDA(device_id) => {
                Self::build_cuda(&mut builder, device_id).unwrap_or_else(|err| {
                    log::warn!("{err}, Using cpu");
                    device = InferenceDevice::CPU;
                })
            }
            InferenceDevice::CoreML(_) => Self::build_coreml(&mut builder).unwrap_or_else(|err| {
                log::warn!("{err}, Using cpu");
                device = InferenceDevice::CPU;
            }),
            InferenceDevice::CPU => {
                Self::build_cpu(&mut builder)?;
            }
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(&config.weights_path)?;

        let input_name = match session.inputs.first() {
            Some(input) => input.name.clone(),
            None => anyhow::bail!("Model {} declares no inputs", config.weights_path),
        };
        let output_name = match session.outputs.first() {
            Some(output) => output.name.clone(),
            None => anyhow::bail!("Model {} declares no outputs", config.weights_path),
        };

        log::info!("Backend: ONNXRuntime | Device: {} | Input: {} | Output: {}",
            device, input_name, output_name);

        Ok(Self {
            session,
            device,
            input_name,
            output_name,
            model_width: config.width,
            model_height: config.height,
        })
    }

    pub fn device(&self) -> InferenceDevice {
        self.device
    }

    fn build_cuda(builder: &mut SessionBuilder, device_id: usize) -> Result<()> {
        let ep = CUDAExecutionProvider::default()
            .with_device_id(device_id as i32);
        if ep.is_available()? {
            if let Err(err) = ep.register(builder) {
                anyhow::bail!("CUDA initialization failed: {:?}", err)
            }
            Ok(())
        } else {
            anyhow::bail!("CUDA execution provider not available")
        }
    }

    fn build_coreml(builder: &mut SessionBuilder) -> Result<()> {
        let ep = CoreMLExecutionProvider::default()
            .with_subgraphs(false);
        if ep.is_available()? {
            if let Err(err) = ep.register(builder) {
                anyhow::bail!("CoreML initialization failed: {:?}", err)
            }
            Ok(())
        } else {
            anyhow::bail!("CoreML execution provider not available")
        }
    }

    fn build_cpu(builder: &mut SessionBuilder) -> Result<()> {
        let ep = CPUExecutionProvider::default();
        if ep.is_available()? {
            if let Err(err) = ep.register(builder) {
                anyhow::bail!("CPU initialization failed: {:?}", err)
            }
            Ok(())
        } else {
            anyhow::bail!("CPU execution provider not available")
        }
    }
}

impl InferenceProcess for OrtInference {
    fn infer(&mut self, frame: &VbFrame) -> crate::error::Result<InferenceOutput> {
        if frame.dimensions() != (self.model_width, self.model_height) {
            return Err(VbError::inference(format!(
                "model expects {}x{} input, got {}x{}",
                self.model_width, self.model_height, frame.width(), frame.height()
            )));
        }
        let input = image_ops::to_nchw_f32(frame)?;
        let value = Value::from_array(input).map_err(|e| VbError::inference(e.to_string()))?;

        let inputs = ort::inputs![self.input_name.as_str() => value]
            .map_err(|e| VbError::inference(e.to_string()))?;
        let outputs = self.session
            .run(inputs)
            .map_err(|e| VbError::inference(e.to_string()))?;

        let output = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| VbError::inference(e.to_string()))?;

        Ok(RawOutputTensor::from_dyn(output)?.to_owned_output())
    }

    fn name(&self) -> &str {
        "onnxruntime"
    }
}
