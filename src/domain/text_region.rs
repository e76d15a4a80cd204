//! Text detection results and configuration.

use crate::core::config::{ConfigError, ConfigValidator};
use crate::core::constants::{
    DEFAULT_INPUT_HEIGHT, DEFAULT_INPUT_WIDTH, DEFAULT_MIN_CONFIDENCE, DEFAULT_OVERLAP_THRESHOLD,
    INPUT_SIZE_DIVISOR,
};
use crate::processors::Rectangle;
use serde::{Deserialize, Serialize};

/// A detected text region in original image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    /// The region's bounding rectangle.
    pub bbox: Rectangle,
    /// Confidence of the detector cell that produced the rectangle.
    pub confidence: f32,
    /// Recognized text, filled in by a separate recognition step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TextRegion {
    /// Creates a region without recognized text.
    pub fn new(bbox: Rectangle, confidence: f32) -> Self {
        Self {
            bbox,
            confidence,
            text: None,
        }
    }

    /// Attaches recognized text to the region.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Configuration for text region detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDetectionConfig {
    /// Cells scoring below this never become candidates (default: 0.5)
    pub min_confidence: f32,
    /// Suppression overlap threshold, in `(0, 1]` (default: 0.3)
    pub overlap_threshold: f32,
    /// Width images are resized to before detection (default: 320)
    pub input_width: u32,
    /// Height images are resized to before detection (default: 320)
    pub input_height: u32,
}

impl Default for TextDetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            input_width: DEFAULT_INPUT_WIDTH,
            input_height: DEFAULT_INPUT_HEIGHT,
        }
    }
}

impl ConfigValidator for TextDetectionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_unit_range("min_confidence", self.min_confidence, 0.0, 1.0)?;
        if !self.overlap_threshold.is_finite()
            || self.overlap_threshold <= 0.0
            || self.overlap_threshold > 1.0
        {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "overlap_threshold must be in (0, 1], got {}",
                    self.overlap_threshold
                ),
            });
        }
        for (name, value) in [
            ("input_width", self.input_width),
            ("input_height", self.input_height),
        ] {
            if value == 0 || value % INPUT_SIZE_DIVISOR != 0 {
                return Err(ConfigError::ValidationFailed {
                    message: format!(
                        "{name} must be a positive multiple of {INPUT_SIZE_DIVISOR}, got {value}"
                    ),
                });
            }
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TextDetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let config = TextDetectionConfig {
            min_confidence: 1.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TextDetectionConfig {
            overlap_threshold: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TextDetectionConfig {
            input_width: 300,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_json() {
        let config: TextDetectionConfig =
            serde_json::from_str(r#"{"min_confidence": 0.2}"#).unwrap();
        assert_eq!(config.min_confidence, 0.2);
        assert_eq!(config.overlap_threshold, DEFAULT_OVERLAP_THRESHOLD);
    }

    #[test]
    fn test_region_serialization_skips_missing_text() {
        let region = TextRegion::new(Rectangle::new(1, 2, 3, 4), 0.5);
        let json = serde_json::to_string(&region).unwrap();
        assert!(!json.contains("text"));

        let region = region.with_text("EXIT");
        let json = serde_json::to_string(&region).unwrap();
        assert!(json.contains("\"text\":\"EXIT\""));
    }
}
