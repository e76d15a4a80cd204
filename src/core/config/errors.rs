//! Configuration error types and validation traits.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a model path does not exist.
    #[error("model path does not exist: {path}")]
    ModelPathNotFound { path: std::path::PathBuf },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Error indicating that validation failed.
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },
}

/// A trait for validating configuration parameters.
///
/// Implemented by every serde-loadable config struct so that values read
/// from the command line or a JSON file are checked once at the boundary.
pub trait ConfigValidator {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates a model path.
    ///
    /// This method checks that the model path exists and is a file.
    fn validate_model_path(&self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            Err(ConfigError::ModelPathNotFound {
                path: path.to_path_buf(),
            })
        } else if !path.is_file() {
            Err(ConfigError::InvalidConfig {
                message: format!("model path is not a file: {}", path.display()),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that an `f32` lies in the inclusive range `[min, max]`.
    fn validate_unit_range(
        &self,
        field: &str,
        value: f32,
        min: f32,
        max: f32,
    ) -> Result<(), ConfigError> {
        if !value.is_finite() || value < min || value > max {
            return Err(ConfigError::ValidationFailed {
                message: format!("{field} must be in [{min}, {max}], got {value}"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    impl ConfigValidator for Dummy {
        fn validate(&self) -> Result<(), ConfigError> {
            Ok(())
        }

        fn get_defaults() -> Self {
            Dummy
        }
    }

    #[test]
    fn test_missing_model_path() {
        let err = Dummy
            .validate_model_path(Path::new("definitely/not/here.onnx"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ModelPathNotFound { .. }));
    }

    #[test]
    fn test_unit_range() {
        assert!(Dummy.validate_unit_range("x", 0.5, 0.0, 1.0).is_ok());
        assert!(Dummy.validate_unit_range("x", 1.5, 0.0, 1.0).is_err());
        assert!(Dummy.validate_unit_range("x", f32::NAN, 0.0, 1.0).is_err());
    }
}
