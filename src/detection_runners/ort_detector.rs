mod ort_inference;

pub use ort_inference::*;
