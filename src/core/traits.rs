//! Traits at the boundary between this crate and detection models.

use crate::core::OCRError;
use image::RgbImage;
use ndarray::Array4;

/// Raw output of an EAST-style detection network for one image.
///
/// `scores` is `[batch, 1, rows, cols]` and `geometry` is
/// `[batch, 5, rows, cols]`. Only batch 0 is decoded.
#[derive(Debug, Clone)]
pub struct DetectorOutput {
    /// Per-cell text confidence.
    pub scores: Array4<f32>,
    /// Per-cell edge distances (top, right, bottom, left) and angle.
    pub geometry: Array4<f32>,
}

impl DetectorOutput {
    /// Pairs a score map with its geometry map.
    pub fn new(scores: Array4<f32>, geometry: Array4<f32>) -> Self {
        Self { scores, geometry }
    }
}

/// A text detection model: given an image already resized to
/// [`TextDetector::input_size`], returns its score and geometry maps.
///
/// Implementations own their model handle. Callers construct one,
/// inject it into a predictor and reuse it for every image.
pub trait TextDetector: Send + Sync {
    /// Runs a forward pass on a single image.
    fn detect(&self, image: &RgbImage) -> Result<DetectorOutput, OCRError>;

    /// The `(width, height)` the model expects its input resized to.
    fn input_size(&self) -> (u32, u32);

    /// Name used in logs and error messages.
    fn name(&self) -> &str {
        "detector"
    }
}

impl<T: TextDetector + ?Sized> TextDetector for Box<T> {
    fn detect(&self, image: &RgbImage) -> Result<DetectorOutput, OCRError> {
        (**self).detect(image)
    }

    fn input_size(&self) -> (u32, u32) {
        (**self).input_size()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
