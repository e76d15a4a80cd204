//! The core module of the pipeline.
//!
//! This module contains the fundamental components shared by the processors
//! and predictors, including:
//! - Configuration management
//! - Constants describing the detector tensor layout
//! - Error handling
//! - ONNX Runtime session loading
//! - The detector trait
//! - Boundary validation helpers

pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;
pub mod validation;

pub use config::{ConfigError, ConfigValidator, OrtSessionConfig, ParallelPolicy};
pub use constants::*;
pub use errors::{OCRError, OcrResult, ProcessingStage, SimpleError};
pub use inference::load_session;
pub use traits::{DetectorOutput, TextDetector};
pub use validation::{
    validate_confidence, validate_detector_maps, validate_overlap_threshold, validate_positive,
    validate_same_length,
};
