//! Error handling for the text region pipeline.

mod types;

pub use types::{OCRError, ProcessingStage, SimpleError};

/// Convenience result alias used across the crate.
pub type OcrResult<T> = Result<T, OCRError>;
