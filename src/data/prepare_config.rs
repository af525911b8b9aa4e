use serde::{Deserialize, Serialize};
use crate::common::{PixelFormat, VbBox};

pub const MODEL_INPUT_SIZE: u32 = 640;

/// Frame preparer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    pub target_width: u32,
    pub target_height: u32,
    /// Rotate 90 degrees clockwise before scaling.
    pub rotate_90_cw: bool,
    pub output_format: PixelFormat,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            target_width: MODEL_INPUT_SIZE,
            target_height: MODEL_INPUT_SIZE,
            rotate_90_cw: true,
            output_format: PixelFormat::Bgra8,
        }
    }
}

impl PrepareConfig {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_target(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    pub fn with_rotation(mut self, rotate_90_cw: bool) -> Self {
        self.rotate_90_cw = rotate_90_cw;
        self
    }

    pub fn with_output_format(mut self, format: PixelFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Geometry of one prepare call: source size, destination size and the
/// independent per-axis scale applied after the optional rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageTransformInfo {
    pub width_src: u32,
    pub height_src: u32,
    pub width_dst: u32,
    pub height_dst: u32,
    pub width_scale: f32,
    pub height_scale: f32,
    pub rotated: bool,
}

impl ImageTransformInfo {
    pub fn new(width_src: u32, height_src: u32, width_dst: u32, height_dst: u32, rotated: bool) -> Self {
        // Rotation swaps the axes before the resize sees them.
        let (w, h) = if rotated { (height_src, width_src) } else { (width_src, height_src) };
        Self {
            width_src,
            height_src,
            width_dst,
            height_dst,
            width_scale: width_dst as f32 / w as f32,
            height_scale: height_dst as f32 / h as f32,
            rotated,
        }
    }

    /// Maps a box in the prepared (model) frame back to the source frame.
    pub fn to_source(&self, bbox: &VbBox) -> VbBox {
        let unscaled = bbox.scaled(1.0 / self.width_scale, 1.0 / self.height_scale);
        if !self.rotated {
            return unscaled;
        }
        // Undo the clockwise turn: rotated (xr, yr) came from source (yr, H - xr).
        let (xr, yr, wr, hr) = unscaled.xy_wh();
        VbBox::new(yr, self.height_src as f32 - xr - wr, hr, wr)
    }
}
