use serde::{Deserialize, Serialize};

/// Unit of the box channels in the model output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSpace {
    /// Values are already in the model's 640x640 pixel space.
    #[default] RawPixel,
    /// Values are fractions of the image; the decoder multiplies them by the image size.
    Normalized,
}

/// How a decoded box is placed on the display surface.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MappingPolicy {
    /// The overlay shares the model's fixed input space, boxes are drawn unchanged.
    #[default] DirectOverlay,
    /// Boxes are unit-normalized in sensor orientation and get rotated 90 degrees,
    /// mirrored and scaled to the portrait frame.
    OrientationCorrecting,
}

impl CoordinateSpace {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateSpace::RawPixel => "raw_pixel",
            CoordinateSpace::Normalized => "normalized",
        }
    }
}

impl MappingPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingPolicy::DirectOverlay => "direct_overlay",
            MappingPolicy::OrientationCorrecting => "orientation_correcting",
        }
    }
}
