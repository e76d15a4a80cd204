//! Image loading and resizing helpers.

use crate::core::{OCRError, validate_positive};
use crate::processors::ResizeRatio;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Converts a DynamicImage to an RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
pub fn load_image(path: &Path) -> Result<RgbImage, OCRError> {
    let img = image::open(path).map_err(OCRError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Resizes `image` to exactly `width × height`, ignoring aspect ratio.
///
/// Returns the resized image together with the ratio needed to map
/// coordinates in the resized frame back onto the original.
pub fn resize_image(
    image: &RgbImage,
    width: u32,
    height: u32,
) -> Result<(RgbImage, ResizeRatio), OCRError> {
    validate_positive(width, "width")?;
    validate_positive(height, "height")?;
    validate_positive(image.width(), "image width")?;
    validate_positive(image.height(), "image height")?;

    let ratio = ResizeRatio::new(image.width(), image.height(), width, height)?;
    if image.dimensions() == (width, height) {
        return Ok((image.clone(), ratio));
    }

    let resized = imageops::resize(image, width, height, FilterType::Triangle);
    Ok((resized, ratio))
}

/// Returns `true` if `path` has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            crate::core::SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_image_returns_ratio() {
        let image = RgbImage::new(640, 480);
        let (resized, ratio) = resize_image(&image, 320, 320).unwrap();
        assert_eq!(resized.dimensions(), (320, 320));
        assert_eq!(ratio, ResizeRatio::new(640, 480, 320, 320).unwrap());
    }

    #[test]
    fn test_resize_image_same_size() {
        let image = RgbImage::new(32, 64);
        let (resized, ratio) = resize_image(&image, 32, 64).unwrap();
        assert_eq!(resized.dimensions(), (32, 64));
        assert_eq!(ratio, ResizeRatio::identity());
    }

    #[test]
    fn test_resize_image_rejects_empty() {
        assert!(resize_image(&RgbImage::new(0, 10), 32, 32).is_err());
        assert!(resize_image(&RgbImage::new(10, 10), 0, 32).is_err());
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("scan.png")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }
}
