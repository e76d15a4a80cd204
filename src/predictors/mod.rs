//! Predictors
//!
//! High-level entry points that chain preprocessing, model inference and
//! postprocessing.

pub mod text_detection;

pub use text_detection::{TextRegionPredictor, TextRegionPredictorBuilder};
