//! Configuration types for the CLI.

use serde::{Deserialize, Serialize};
use snaptext::core::OCRError;
use snaptext::core::config::{ConfigError, ConfigValidator, ParallelPolicy};
use snaptext::domain::TextDetectionConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for single-image detection
#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub model: PathBuf,
    pub detection: TextDetectionConfig,
    pub device: String,
}

/// Configuration for a batch run over a folder.
///
/// Loadable from JSON; every field is optional there and command-line flags
/// take precedence over the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Folder scanned for images (not recursive)
    pub input_folder: Option<PathBuf>,
    /// Folder annotated images are written to
    pub output_folder: Option<PathBuf>,
    /// Path to the EAST model
    pub model: Option<PathBuf>,
    /// Execution device (cpu, cuda, cuda:N)
    pub device: Option<String>,
    #[serde(flatten)]
    pub detection: TextDetectionConfig,
    pub parallel: ParallelPolicy,
}

impl BatchConfig {
    /// Reads a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, OCRError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidConfig {
            message: format!("{}: {}", path.display(), e),
        })?;
        Ok(config)
    }
}

impl ConfigValidator for BatchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.input_folder.is_none() {
            return Err(ConfigError::ValidationFailed {
                message: "input folder is required".to_string(),
            });
        }
        if self.output_folder.is_none() {
            return Err(ConfigError::ValidationFailed {
                message: "output folder is required".to_string(),
            });
        }
        match &self.model {
            Some(model) => self.validate_model_path(model)?,
            None => {
                return Err(ConfigError::ValidationFailed {
                    message: "model path is required".to_string(),
                });
            }
        }
        self.detection.validate()
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_batch_config_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"input_folder": "images", "output_folder": "out", "min_confidence": 0.2}}"#
        )
        .unwrap();

        let config = BatchConfig::from_file(file.path()).unwrap();
        assert_eq!(config.input_folder, Some(PathBuf::from("images")));
        assert_eq!(config.detection.min_confidence, 0.2);
        assert_eq!(config.detection.input_width, 320);
        assert_eq!(config.parallel.sequential_threshold, 1);
    }

    #[test]
    fn test_batch_config_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = BatchConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, OCRError::ConfigError { .. }));
    }

    #[test]
    fn test_batch_config_requires_folders() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("east.onnx");
        fs::write(&model, b"").unwrap();

        let mut config = BatchConfig {
            model: Some(model),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.input_folder = Some(dir.path().to_path_buf());
        config.output_folder = Some(dir.path().join("out"));
        assert!(config.validate().is_ok());

        config.detection.min_confidence = -0.1;
        assert!(config.validate().is_err());
    }
}
