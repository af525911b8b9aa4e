mod coordinate_space;
mod inference_device;
mod model_config;
mod vb_box;
mod vb_detection;
mod vb_frame;

pub use coordinate_space::*;
pub use inference_device::*;
pub use model_config::*;
pub use vb_box::*;
pub use vb_detection::*;
pub use vb_frame::*;
