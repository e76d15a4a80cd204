//! Input Validation Utilities
//!
//! Boundary checks run before any processing starts, so that bad
//! configuration or malformed tensors fail fast with a typed error.

use crate::core::OCRError;
use crate::core::constants::{GEOMETRY_CHANNELS, SCORE_CHANNELS};

/// Validates that a minimum confidence is finite and within `[0, 1]`.
#[inline]
pub fn validate_confidence(value: f32) -> Result<(), OCRError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(OCRError::InvalidConfidence { value });
    }
    Ok(())
}

/// Validates that an overlap threshold is finite and within `(0, 1]`.
#[inline]
pub fn validate_overlap_threshold(value: f32) -> Result<(), OCRError> {
    if !value.is_finite() || value <= 0.0 || value > 1.0 {
        return Err(OCRError::InvalidThreshold { value });
    }
    Ok(())
}

/// Validates that scores, when present, are index-aligned with rectangles.
#[inline]
pub fn validate_same_length<T, U>(rectangles: &[T], scores: &[U]) -> Result<(), OCRError> {
    if rectangles.len() != scores.len() {
        return Err(OCRError::LengthMismatch {
            rectangles: rectangles.len(),
            scores: scores.len(),
        });
    }
    Ok(())
}

/// Validates that a value is positive (> 0).
#[inline]
pub fn validate_positive<T: PartialOrd + std::fmt::Display + Default>(
    value: T,
    param_name: &str,
) -> Result<(), OCRError> {
    if value <= T::default() {
        return Err(OCRError::InvalidInput {
            message: format!(
                "Parameter '{}' must be positive, got: {}",
                param_name, value
            ),
        });
    }
    Ok(())
}

/// Validates a score/geometry tensor pair.
///
/// Both tensors are `[batch, channel, rows, cols]`. The score map must have
/// exactly one channel, the geometry map exactly five, both need at least one
/// batch entry, and they must describe the same `rows × cols` grid.
pub fn validate_detector_maps(scores: &[usize], geometry: &[usize]) -> Result<(), OCRError> {
    if scores.len() != 4 || scores[0] == 0 || scores[1] != SCORE_CHANNELS {
        return Err(OCRError::invalid_shape(
            "scores",
            format!("[N>=1, {SCORE_CHANNELS}, rows, cols]"),
            scores,
        ));
    }
    if geometry.len() != 4 || geometry[0] == 0 || geometry[1] != GEOMETRY_CHANNELS {
        return Err(OCRError::invalid_shape(
            "geometry",
            format!("[N>=1, {GEOMETRY_CHANNELS}, rows, cols]"),
            geometry,
        ));
    }
    if scores[2..] != geometry[2..] {
        return Err(OCRError::invalid_shape(
            "geometry",
            format!("grid {}x{} matching the score map", scores[2], scores[3]),
            geometry,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds() {
        assert!(validate_confidence(0.0).is_ok());
        assert!(validate_confidence(1.0).is_ok());
        assert!(matches!(
            validate_confidence(1.01),
            Err(OCRError::InvalidConfidence { .. })
        ));
        assert!(validate_confidence(-0.1).is_err());
        assert!(validate_confidence(f32::NAN).is_err());
    }

    #[test]
    fn test_overlap_threshold_bounds() {
        assert!(validate_overlap_threshold(1.0).is_ok());
        assert!(validate_overlap_threshold(0.3).is_ok());
        assert!(matches!(
            validate_overlap_threshold(0.0),
            Err(OCRError::InvalidThreshold { .. })
        ));
        assert!(validate_overlap_threshold(1.5).is_err());
        assert!(validate_overlap_threshold(f32::INFINITY).is_err());
    }

    #[test]
    fn test_detector_map_shapes() {
        assert!(validate_detector_maps(&[1, 1, 80, 80], &[1, 5, 80, 80]).is_ok());
        assert!(validate_detector_maps(&[1, 2, 80, 80], &[1, 5, 80, 80]).is_err());
        assert!(validate_detector_maps(&[1, 1, 80, 80], &[1, 4, 80, 80]).is_err());
        assert!(validate_detector_maps(&[1, 1, 80, 80], &[1, 5, 80, 79]).is_err());
        assert!(validate_detector_maps(&[0, 1, 80, 80], &[0, 5, 80, 80]).is_err());
    }

    #[test]
    fn test_same_length() {
        assert!(validate_same_length(&[1, 2], &[0.1, 0.2]).is_ok());
        assert!(matches!(
            validate_same_length(&[1, 2], &[0.1]),
            Err(OCRError::LengthMismatch {
                rectangles: 2,
                scores: 1
            })
        ));
    }
}
