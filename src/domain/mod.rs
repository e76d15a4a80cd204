//! Domain types exchanged with callers.

pub mod text_region;

pub use text_region::{TextDetectionConfig, TextRegion};
