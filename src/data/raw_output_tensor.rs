use half::f16;
use ndarray::{Array2, ArrayView2, ArrayViewD, Axis, Ix2};
use crate::data::decode_config::DETECTION_CHANNELS;
use crate::error::{Result, VbError};

/// Channel order inside the detection head output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    CenterX = 0,
    CenterY = 1,
    Width = 2,
    Height = 3,
    Confidence = 4,
}

/// Read-only `[channels, anchors]` view over a channel-major model output.
///
/// Each channel is a contiguous run of `anchors` values, so anchor `i` of
/// channel `c` lives at flat offset `c * anchors + i`.
#[derive(Debug, Clone)]
pub struct RawOutputTensor<'a> {
    view: ArrayView2<'a, f32>,
}

impl<'a> RawOutputTensor<'a> {
    /// Wraps a flat buffer. Fails when its length is not `channels * anchors`.
    pub fn new(data: &'a [f32], channels: usize, anchors: usize) -> Result<Self> {
        let expected = channels * anchors;
        if data.len() != expected {
            return Err(VbError::Shape { expected, actual: data.len() });
        }
        let view = ArrayView2::from_shape((channels, anchors), data)?;
        Ok(Self { view })
    }

    /// Accepts the `[1, channels, anchors]` or `[channels, anchors]` view an
    /// inference runtime hands back.
    pub fn from_dyn(view: ArrayViewD<'a, f32>) -> Result<Self> {
        let view = match view.ndim() {
            3 if view.shape()[0] == 1 => view.index_axis_move(Axis(0), 0),
            2 => view,
            _ => {
                return Err(VbError::Shape {
                    expected: DETECTION_CHANNELS * view.shape().last().copied().unwrap_or(0),
                    actual: view.len(),
                })
            }
        };
        let view = view.into_dimensionality::<Ix2>()?;
        Ok(Self { view })
    }

    /// Reinterprets the same contiguous buffer under another `[channels, anchors]` shape.
    pub fn reshaped(&self, channels: usize, anchors: usize) -> Result<Self> {
        let actual = self.view.len();
        let view = self.view
            .into_shape_with_order((channels, anchors))
            .map_err(|_| VbError::Shape { expected: channels * anchors, actual })?;
        Ok(Self { view })
    }

    pub fn channels(&self) -> usize {
        self.view.nrows()
    }

    pub fn anchors(&self) -> usize {
        self.view.ncols()
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `anchor >= self.anchors()`.
    pub fn get(&self, channel: Channel, anchor: usize) -> f32 {
        self.view[[channel as usize, anchor]]
    }

    /// `(cx, cy, w, h, conf)` for one anchor.
    ///
    /// # Panics
    ///
    /// Panics if `anchor >= self.anchors()` or the tensor has fewer than five channels.
    pub fn anchor(&self, anchor: usize) -> (f32, f32, f32, f32, f32) {
        let col = self.view.column(anchor);
        (col[0], col[1], col[2], col[3], col[4])
    }

    pub fn view(&self) -> ArrayView2<'a, f32> {
        self.view
    }

    /// Copies the view into an owned output that outlives the runtime's buffers.
    pub fn to_owned_output(&self) -> InferenceOutput {
        InferenceOutput { data: self.view.to_owned() }
    }
}

/// Owned model output, as returned by an inference collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOutput {
    data: Array2<f32>,
}

impl InferenceOutput {
    pub fn from_shape_vec(channels: usize, anchors: usize, data: Vec<f32>) -> Result<Self> {
        let actual = data.len();
        let data = Array2::from_shape_vec((channels, anchors), data)
            .map_err(|_| VbError::Shape { expected: channels * anchors, actual })?;
        Ok(Self { data })
    }

    /// Widens a half-precision head output.
    pub fn from_f16(channels: usize, anchors: usize, data: &[f16]) -> Result<Self> {
        Self::from_shape_vec(channels, anchors, widen_f16(data))
    }

    pub fn view(&self) -> RawOutputTensor<'_> {
        RawOutputTensor { view: self.data.view() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

pub fn widen_f16(data: &[f16]) -> Vec<f32> {
    data.iter().map(|x| x.to_f32()).collect()
}
