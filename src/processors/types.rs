//! Types used in image processing operations.

use crate::core::OCRError;
use serde::{Deserialize, Serialize};

/// Ratio between an original image and the size it was resized to for
/// detection.
///
/// Rectangles decoded in the resized frame are mapped back to the original
/// image by multiplying x by `ratio_w` and y by `ratio_h`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeRatio {
    /// Original width over resized width.
    pub ratio_w: f32,
    /// Original height over resized height.
    pub ratio_h: f32,
}

impl ResizeRatio {
    /// Computes the ratio for an image of `src_w × src_h` resized to `dst_w × dst_h`.
    pub fn new(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Result<Self, OCRError> {
        if dst_w == 0 || dst_h == 0 {
            return Err(OCRError::InvalidInput {
                message: format!("resize target must be non-empty, got {dst_w}x{dst_h}"),
            });
        }
        Ok(Self {
            ratio_w: src_w as f32 / dst_w as f32,
            ratio_h: src_h as f32 / dst_h as f32,
        })
    }

    /// The ratio that leaves coordinates unchanged.
    pub fn identity() -> Self {
        Self {
            ratio_w: 1.0,
            ratio_h: 1.0,
        }
    }
}

impl Default for ResizeRatio {
    fn default() -> Self {
        Self::identity()
    }
}

/// Memory layout of the detector's input and output tensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// Batch, Channel, Height, Width (OpenCV blob order)
    #[default]
    Nchw,
    /// Batch, Height, Width, Channel (TensorFlow export order)
    Nhwc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_ratio() {
        let ratio = ResizeRatio::new(640, 480, 320, 320).unwrap();
        assert_eq!(ratio.ratio_w, 2.0);
        assert_eq!(ratio.ratio_h, 1.5);
    }

    #[test]
    fn test_resize_ratio_rejects_empty_target() {
        assert!(ResizeRatio::new(640, 480, 0, 320).is_err());
    }

    #[test]
    fn test_layout_deserialize() {
        let layout: TensorLayout = serde_json::from_str("\"nhwc\"").unwrap();
        assert_eq!(layout, TensorLayout::Nhwc);
    }
}
