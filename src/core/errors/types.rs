//! Core error types for the text region pipeline.
//!
//! This module defines the [`OCRError`] enum returned by every fallible
//! operation in the crate, and the [`ProcessingStage`] enum used to tag
//! wrapped errors with the stage they came from.

use thiserror::Error;

/// Enum representing different stages of processing in the pipeline.
///
/// Used to identify which stage an error occurred in when an underlying
/// error is wrapped into [`OCRError::Processing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while rendering or saving annotated output.
    Visualization,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Visualization => write!(f, "visualization"),
        }
    }
}

/// Enum representing various errors that can occur in the pipeline.
#[derive(Error, Debug)]
pub enum OCRError {
    /// Error occurred while loading or saving an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Score and geometry tensors do not describe a compatible grid.
    #[error("invalid shape for tensor '{tensor}': expected {expected}, got {actual:?}")]
    InvalidInputShape {
        /// Which tensor failed the check.
        tensor: &'static str,
        /// Human readable description of the expected layout.
        expected: String,
        /// The shape that was actually supplied.
        actual: Vec<usize>,
    },

    /// Confidence scores are not index-aligned with the rectangles.
    #[error("length mismatch: {rectangles} rectangles but {scores} scores")]
    LengthMismatch {
        /// Number of rectangles supplied.
        rectangles: usize,
        /// Number of scores supplied.
        scores: usize,
    },

    /// Overlap threshold outside `(0, 1]`.
    #[error("overlap threshold must be in (0, 1], got {value}")]
    InvalidThreshold {
        /// The rejected value.
        value: f32,
    },

    /// Minimum confidence outside `[0, 1]`.
    #[error("minimum confidence must be in [0, 1], got {value}")]
    InvalidConfidence {
        /// The rejected value.
        value: f32,
    },

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during inference.
    #[error("inference failed in model '{model_name}': {context}")]
    Inference {
        /// The name of the model where inference failed.
        model_name: String,
        /// Additional context about the inference error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from basic tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// Error loading a model file, with context and suggestions.
    #[error("model load failed for '{model_path}': {reason}{suggestion}")]
    ModelLoad {
        /// Path to the model that failed to load
        model_path: String,
        /// Short reason string
        reason: String,
        /// Optional suggestion (prefixed with '; ' when present)
        suggestion: String,
        /// Underlying source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<image::ImageError> for OCRError {
    /// Converts an image::ImageError to OCRError::ImageLoad.
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl From<crate::core::config::ConfigError> for OCRError {
    /// Converts a ConfigError to OCRError::ConfigError.
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}

impl OCRError {
    /// Creates a shape error for a tensor that does not match the expected layout.
    pub fn invalid_shape(
        tensor: &'static str,
        expected: impl Into<String>,
        actual: &[usize],
    ) -> Self {
        Self::InvalidInputShape {
            tensor,
            expected: expected.into(),
            actual: actual.to_vec(),
        }
    }

    /// Creates a configuration error for invalid field values.
    ///
    /// # Arguments
    ///
    /// * `field` - The name of the field with an invalid value
    /// * `expected` - Description of what was expected
    /// * `actual` - Description of what was actually provided
    pub fn invalid_field(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::ConfigError {
            message: format!(
                "invalid value for field '{}': expected {}, got {}",
                field.into(),
                expected.into(),
                actual.into()
            ),
        }
    }

    /// Wraps an error raised by a model during a forward pass.
    pub fn inference_error(
        model_name: impl Into<String>,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.into(),
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Wraps an error that occurred in a named processing stage.
    pub fn processing_error(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a model load error.
    ///
    /// The suggestion, when present, is appended to the message after `"; "`.
    pub fn model_load_error(
        path: &std::path::Path,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<ort::Error>,
    ) -> Self {
        Self::ModelLoad {
            model_path: path.display().to_string(),
            reason: reason.into(),
            suggestion: suggestion.map(|s| format!("; {s}")).unwrap_or_default(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}

/// A minimal string-backed error, used as the source of wrapped errors
/// that have no underlying error value of their own.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SimpleError(String);

impl SimpleError {
    /// Creates a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
