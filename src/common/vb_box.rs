use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as top-left corner plus size.
///
/// The coordinate space is not recorded here; see
/// [`CoordinateSpace`](crate::common::CoordinateSpace) and
/// [`MappingPolicy`](crate::common::MappingPolicy) for how a box is interpreted.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, PartialOrd)]
pub struct VbBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl VbBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a box from its center and size, the layout the model emits.
    pub fn from_cxcy_wh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    /// Returns the center x-coordinate of the bounding box.
    pub fn cx(&self) -> f32 {
        self.x + self.w / 2.
    }

    /// Returns the center y-coordinate of the bounding box.
    pub fn cy(&self) -> f32 {
        self.y + self.h / 2.
    }

    /// Returns the bounding box coordinates and size as `(x, y, w, h)`.
    pub fn xy_wh(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, self.w, self.h)
    }

    /// Scales the box independently along each axis. Position and size both move.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            w: self.w * sx,
            h: self.h * sy,
        }
    }

    /// Rounded `(x, y, w, h)` in whole pixels, for drawing.
    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x.round() as i32,
         self.y.round() as i32,
         self.w.round() as i32,
         self.h.round() as i32)
    }
}
