//! # snaptext
//!
//! Text region detection for natural images with EAST models exported to ONNX.
//!
//! An EAST network predicts, for every 4x4 block of its input, a text
//! confidence and a rotated box geometry. This crate turns those two maps into
//! axis-aligned rectangles and thins overlapping candidates with greedy
//! suppression.
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, validation and the detector trait
//! * [`domain`] - Result and configuration types handed to callers
//! * [`models`] - ONNX Runtime detector backends
//! * [`predictors`] - The end-to-end predictor
//! * [`processors`] - Region decoding, suppression and rectangle geometry
//! * [`utils`] - Image loading, resizing, drawing and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snaptext::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let predictor = TextRegionPredictor::builder()
//!     .min_confidence(0.5)
//!     .overlap_threshold(0.3)
//!     .build_east("models/frozen_east_text_detection.onnx")?;
//!
//! let image = load_image(Path::new("sign.jpg"))?;
//! for region in predictor.predict(&image)? {
//!     println!("{:?} {:.2}", region.bbox, region.confidence);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The decoding and suppression steps can also be driven directly from maps
//! produced elsewhere:
//!
//! ```rust
//! use ndarray::Array4;
//! use snaptext::processors::{decode, suppress};
//!
//! let scores = Array4::<f32>::zeros((1, 1, 80, 80));
//! let geometry = Array4::<f32>::zeros((1, 5, 80, 80));
//! let decoded = decode(scores.view(), geometry.view(), 0.5).unwrap();
//! let kept = suppress(&decoded.rectangles, Some(decoded.confidences.as_slice()), 0.3).unwrap();
//! assert!(kept.is_empty());
//! ```

// Core modules
pub mod core;
pub mod domain;
pub mod models;

pub mod predictors;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use snaptext::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{OCRError, OcrResult, TextDetector};
    pub use crate::domain::{TextDetectionConfig, TextRegion};
    pub use crate::models::{EastDetector, EastDetectorConfig};
    pub use crate::predictors::TextRegionPredictor;
    pub use crate::processors::{Rectangle, ResizeRatio};
    pub use crate::utils::load_image;
}
