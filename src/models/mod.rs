//! Model backends.
//!
//! Each backend implements [`crate::core::TextDetector`] on top of an ONNX
//! Runtime session.

pub mod detection;

pub use detection::{EastDetector, EastDetectorConfig};
