use crate::common::VbFrame;
use crate::data::InferenceOutput;
use crate::error::Result;

/// The model call: a prepared frame in, a `[channels, anchors]` head output out.
///
/// Implementations report every failure as [`VbError::Inference`](crate::VbError::Inference);
/// the pipeline drops the frame and moves on.
pub trait InferenceProcess {
    fn infer(&mut self, frame: &VbFrame) -> Result<InferenceOutput>;

    fn name(&self) -> &str {
        "external"
    }
}

impl<F> InferenceProcess for F
where
    F: FnMut(&VbFrame) -> Result<InferenceOutput>,
{
    fn infer(&mut self, frame: &VbFrame) -> Result<InferenceOutput> {
        self(frame)
    }
}
