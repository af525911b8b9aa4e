use thiserror::Error;

/// Errors raised by the frame preparer, the decoder and the inference collaborator.
///
/// Every variant is local to one frame: the pipeline logs it, drops the frame
/// and carries on with the next one.
#[derive(Debug, Error)]
pub enum VbError {
    #[error("frame conversion failed: {0}")]
    Conversion(String),

    #[error("tensor shape mismatch: expected {expected} elements, got {actual}")]
    Shape { expected: usize, actual: usize },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VbError {
    pub(crate) fn conversion(msg: impl Into<String>) -> Self {
        VbError::Conversion(msg.into())
    }

    #[cfg(feature = "ort")]
    pub(crate) fn inference(msg: impl Into<String>) -> Self {
        VbError::Inference(msg.into())
    }

    /// Whether the error only affects the current frame.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, VbError::Conversion(_) | VbError::Shape { .. } | VbError::Inference(_))
    }
}

impl From<fast_image_resize::ResizeError> for VbError {
    fn from(err: fast_image_resize::ResizeError) -> Self {
        VbError::Conversion(err.to_string())
    }
}

impl From<fast_image_resize::ImageBufferError> for VbError {
    fn from(err: fast_image_resize::ImageBufferError) -> Self {
        VbError::Conversion(err.to_string())
    }
}

impl From<ndarray::ShapeError> for VbError {
    fn from(err: ndarray::ShapeError) -> Self {
        VbError::Conversion(err.to_string())
    }
}

impl From<serde_json::Error> for VbError {
    fn from(err: serde_json::Error) -> Self {
        VbError::Config(err.to_string())
    }
}

pub type Result<T, E = VbError> = std::result::Result<T, E>;
