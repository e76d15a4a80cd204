//! Drawing detected text regions onto images.

use crate::domain::TextRegion;
use crate::processors::Rectangle;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const BBOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Styling for annotated output.
#[derive(Debug, Clone)]
pub struct VisualizationConfig {
    /// Rectangle outline color. Defaults to green.
    pub color: Rgb<u8>,
    /// The thickness of bounding box lines. Defaults to 2.
    pub bbox_thickness: i32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            color: BBOX_COLOR,
            bbox_thickness: 2,
        }
    }
}

/// Returns a copy of `image` with every region outlined.
pub fn draw_regions(
    image: &RgbImage,
    regions: &[TextRegion],
    config: &VisualizationConfig,
) -> RgbImage {
    let mut canvas = image.clone();
    for region in regions {
        draw_rectangle(&mut canvas, &region.bbox, config);
    }
    canvas
}

/// Outlines a single rectangle in place.
///
/// The corners are normalized first; rectangles that collapse to nothing
/// are skipped. Edges beyond the canvas are pulled in to just outside it, so
/// saturated coordinates from extreme geometry draw without overflow.
pub fn draw_rectangle(img: &mut RgbImage, rectangle: &Rectangle, config: &VisualizationConfig) {
    if rectangle.start_x == rectangle.end_x || rectangle.start_y == rectangle.end_y {
        return;
    }
    let thickness = i64::from(config.bbox_thickness.max(1));
    let clip = |a: i32, b: i32, size: u32| {
        let hi = i64::from(size) - 1 + thickness;
        let (lo_v, hi_v) = (i64::from(a.min(b)), i64::from(a.max(b)));
        (lo_v.clamp(-thickness, hi), hi_v.clamp(-thickness, hi))
    };
    let (left, right) = clip(rectangle.start_x, rectangle.end_x, img.width());
    let (top, bottom) = clip(rectangle.start_y, rectangle.end_y, img.height());

    // corners are inclusive pixels
    for k in 0..thickness {
        let rect = Rect::at((left - k) as i32, (top - k) as i32).of_size(
            (right - left + 1 + 2 * k) as u32,
            (bottom - top + 1 + 2 * k) as u32,
        );
        draw_hollow_rect_mut(img, rect, config.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_rectangle_outline() {
        let mut img = RgbImage::new(20, 20);
        let config = VisualizationConfig {
            bbox_thickness: 1,
            ..Default::default()
        };
        draw_rectangle(&mut img, &Rectangle::new(2, 2, 10, 10), &config);

        assert_eq!(*img.get_pixel(2, 2), BBOX_COLOR);
        assert_eq!(*img.get_pixel(2, 6), BBOX_COLOR);
        // interior untouched
        assert_eq!(*img.get_pixel(6, 6), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_skips_degenerate_and_clips() {
        let mut img = RgbImage::new(8, 8);
        let config = VisualizationConfig::default();
        draw_rectangle(&mut img, &Rectangle::new(3, 3, 3, 7), &config);
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));

        // partially outside the image must not panic
        draw_rectangle(&mut img, &Rectangle::new(-4, -4, 4, 4), &config);
        assert_eq!(*img.get_pixel(4, 0), BBOX_COLOR);
    }

    #[test]
    fn test_draw_saturated_rectangle() {
        // what the decoder yields for right = left = 3e9
        let rectangle = Rectangle::new(i32::MIN, -1, i32::MAX, 1);
        let mut img = RgbImage::new(8, 8);
        draw_rectangle(&mut img, &rectangle, &VisualizationConfig::default());

        assert_eq!(*img.get_pixel(3, 1), BBOX_COLOR);
        assert_eq!(*img.get_pixel(3, 2), BBOX_COLOR);
        assert_eq!(*img.get_pixel(3, 0), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(3, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_regions_leaves_source_untouched() {
        let img = RgbImage::new(16, 16);
        let regions = vec![TextRegion::new(Rectangle::new(1, 1, 8, 8), 0.9)];
        let annotated = draw_regions(&img, &regions, &VisualizationConfig::default());
        assert!(img.pixels().all(|p| *p == Rgb([0, 0, 0])));
        assert_ne!(annotated, img);
    }
}
