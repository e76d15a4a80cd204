//! Text Region Predictor
//!
//! This module provides a high-level API for locating text regions in images:
//! resize, detect, decode, rescale and suppress in one call.

use crate::core::config::{ConfigValidator, OrtSessionConfig, ParallelPolicy};
use crate::core::traits::TextDetector;
use crate::core::{OCRError, validate_confidence, validate_overlap_threshold};
use crate::domain::{TextDetectionConfig, TextRegion};
use crate::models::{EastDetector, EastDetectorConfig};
use crate::processors::{Rectangle, decode_output, suppress_indices};
use crate::utils::resize_image;
use image::RgbImage;
use rayon::prelude::*;
use std::path::Path;

/// Text region predictor over any [`TextDetector`].
#[derive(Debug)]
pub struct TextRegionPredictor<D: TextDetector> {
    detector: D,
    min_confidence: f32,
    overlap_threshold: f32,
    parallel: ParallelPolicy,
}

impl TextRegionPredictor<EastDetector> {
    /// Create a new builder for the text region predictor
    pub fn builder() -> TextRegionPredictorBuilder {
        TextRegionPredictorBuilder::new()
    }
}

impl<D: TextDetector> TextRegionPredictor<D> {
    /// The wrapped detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Detects text regions in `image`.
    ///
    /// Rectangles are returned in original image coordinates, in the order
    /// suppression picked them (highest confidence first).
    pub fn predict(&self, image: &RgbImage) -> Result<Vec<TextRegion>, OCRError> {
        let (width, height) = self.detector.input_size();
        let (resized, ratio) = resize_image(image, width, height)?;

        let output = self.detector.detect(&resized)?;
        let decoded = decode_output(&output, self.min_confidence)?;

        let rectangles: Vec<Rectangle> = decoded
            .rectangles
            .iter()
            .map(|rect| rect.scale(&ratio))
            .collect();
        let picked = suppress_indices(
            &rectangles,
            Some(decoded.confidences.as_slice()),
            self.overlap_threshold,
        )?;

        tracing::debug!(
            "{}: {} candidates, {} kept after suppression",
            self.detector.name(),
            rectangles.len(),
            picked.len()
        );

        Ok(picked
            .into_iter()
            .map(|i| TextRegion::new(rectangles[i], decoded.confidences[i]))
            .collect())
    }

    /// Runs [`predict`](Self::predict) on every image.
    ///
    /// Images are processed in parallel when the batch is larger than the
    /// policy's sequential threshold. Results keep the input order.
    pub fn predict_batch(&self, images: &[RgbImage]) -> Result<Vec<Vec<TextRegion>>, OCRError> {
        if self.parallel.should_parallelize(images.len()) {
            images.par_iter().map(|image| self.predict(image)).collect()
        } else {
            images.iter().map(|image| self.predict(image)).collect()
        }
    }
}

/// Builder for [`TextRegionPredictor`]
#[derive(Debug, Clone, Default)]
pub struct TextRegionPredictorBuilder {
    config: TextDetectionConfig,
    parallel: ParallelPolicy,
    ort_config: Option<OrtSessionConfig>,
}

impl TextRegionPredictorBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole detection configuration
    pub fn with_config(mut self, config: TextDetectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum cell confidence
    pub fn min_confidence(mut self, value: f32) -> Self {
        self.config.min_confidence = value;
        self
    }

    /// Set the suppression overlap threshold
    pub fn overlap_threshold(mut self, value: f32) -> Self {
        self.config.overlap_threshold = value;
        self
    }

    /// Set the detector input size used by [`build_east`](Self::build_east)
    pub fn input_size(mut self, width: u32, height: u32) -> Self {
        self.config.input_width = width;
        self.config.input_height = height;
        self
    }

    /// Set the batch parallelism policy
    pub fn parallel_policy(mut self, policy: ParallelPolicy) -> Self {
        self.parallel = policy;
        self
    }

    /// Set the ONNX Runtime session configuration
    pub fn with_ort_config(mut self, config: OrtSessionConfig) -> Self {
        self.ort_config = Some(config);
        self
    }

    /// Build the predictor around an existing detector
    pub fn build<D: TextDetector>(self, detector: D) -> Result<TextRegionPredictor<D>, OCRError> {
        validate_confidence(self.config.min_confidence)?;
        validate_overlap_threshold(self.config.overlap_threshold)?;

        Ok(TextRegionPredictor {
            detector,
            min_confidence: self.config.min_confidence,
            overlap_threshold: self.config.overlap_threshold,
            parallel: self.parallel,
        })
    }

    /// Load an EAST model and build the predictor around it
    pub fn build_east<P: AsRef<Path>>(
        self,
        model_path: P,
    ) -> Result<TextRegionPredictor<EastDetector>, OCRError> {
        self.config.validate()?;
        let detector = EastDetector::new(
            model_path,
            EastDetectorConfig {
                input_width: self.config.input_width,
                input_height: self.config.input_height,
                ort: self.ort_config.clone(),
                ..Default::default()
            },
        )?;
        self.build(detector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::DetectorOutput;
    use ndarray::Array4;

    /// Emits fixed maps regardless of the input image.
    #[derive(Debug)]
    struct FixedDetector {
        size: (u32, u32),
        cells: Vec<(usize, usize, f32, [f32; 5])>,
    }

    impl TextDetector for FixedDetector {
        fn detect(&self, image: &RgbImage) -> Result<DetectorOutput, OCRError> {
            assert_eq!(image.dimensions(), self.size);
            let rows = (self.size.1 / 4) as usize;
            let cols = (self.size.0 / 4) as usize;
            let mut scores = Array4::<f32>::zeros((1, 1, rows, cols));
            let mut geometry = Array4::<f32>::zeros((1, 5, rows, cols));
            for &(y, x, score, geo) in &self.cells {
                scores[[0, 0, y, x]] = score;
                for (c, value) in geo.iter().enumerate() {
                    geometry[[0, c, y, x]] = *value;
                }
            }
            Ok(DetectorOutput::new(scores, geometry))
        }

        fn input_size(&self) -> (u32, u32) {
            self.size
        }
    }

    fn detector(cells: Vec<(usize, usize, f32, [f32; 5])>) -> FixedDetector {
        FixedDetector {
            size: (32, 32),
            cells,
        }
    }

    #[test]
    fn test_predict_rescales_to_original_image() {
        // cell (1, 1) -> (0, 0, 8, 8) in detector space
        let predictor = TextRegionPredictor::builder()
            .build(detector(vec![(1, 1, 0.9, [4.0, 4.0, 4.0, 4.0, 0.0])]))
            .unwrap();

        let regions = predictor.predict(&RgbImage::new(64, 96)).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].bbox, Rectangle::new(0, 0, 16, 24));
        assert_eq!(regions[0].confidence, 0.9);
    }

    #[test]
    fn test_predict_suppresses_overlaps() {
        let geo = [4.0, 4.0, 4.0, 4.0, 0.0];
        let predictor = TextRegionPredictor::builder()
            .build(detector(vec![(2, 2, 0.7, geo), (2, 3, 0.95, geo), (6, 6, 0.6, geo)]))
            .unwrap();

        let regions = predictor.predict(&RgbImage::new(32, 32)).unwrap();
        let confidences: Vec<f32> = regions.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![0.95, 0.6]);
        assert_eq!(regions[0].bbox, Rectangle::new(8, 4, 16, 12));
    }

    #[test]
    fn test_predict_respects_min_confidence() {
        let predictor = TextRegionPredictor::builder()
            .min_confidence(0.8)
            .build(detector(vec![(1, 1, 0.75, [4.0, 4.0, 4.0, 4.0, 0.0])]))
            .unwrap();
        assert!(predictor.predict(&RgbImage::new(32, 32)).unwrap().is_empty());
    }

    #[test]
    fn test_builder_rejects_invalid_thresholds() {
        let err = TextRegionPredictor::builder()
            .overlap_threshold(0.0)
            .build(detector(vec![]))
            .unwrap_err();
        assert!(matches!(err, OCRError::InvalidThreshold { .. }));

        let err = TextRegionPredictor::builder()
            .min_confidence(f32::NAN)
            .build(detector(vec![]))
            .unwrap_err();
        assert!(matches!(err, OCRError::InvalidConfidence { .. }));
    }

    #[test]
    fn test_predict_batch_keeps_order() {
        let predictor = TextRegionPredictor::builder()
            .parallel_policy(ParallelPolicy::new().with_sequential_threshold(0))
            .build(detector(vec![(1, 1, 0.9, [4.0, 4.0, 4.0, 4.0, 0.0])]))
            .unwrap();

        let images = vec![RgbImage::new(32, 32), RgbImage::new(64, 64)];
        let results = predictor.predict_batch(&images).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0][0].bbox, Rectangle::new(0, 0, 8, 8));
        assert_eq!(results[1][0].bbox, Rectangle::new(0, 0, 16, 16));
    }
}
