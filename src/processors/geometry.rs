//! Geometric primitives for text regions.
//!
//! Rectangles use inclusive pixel coordinates: a rectangle spanning
//! `x1..=x2` covers `x2 - x1 + 1` columns. Area and overlap arithmetic is
//! carried out in `f32` so results match a floating point reference.

use crate::processors::types::ResizeRatio;
use serde::{Deserialize, Serialize};

/// An axis-aligned text rectangle `(start_x, start_y, end_x, end_y)`.
///
/// Ordering of start and end is not normalized: a degenerate geometry
/// prediction can yield `start_x > end_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    /// Left edge.
    pub start_x: i32,
    /// Top edge.
    pub start_y: i32,
    /// Right edge.
    pub end_x: i32,
    /// Bottom edge.
    pub end_y: i32,
}

impl Rectangle {
    /// Creates a new rectangle from its corners.
    #[inline]
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Returns `true` when the start corner is not past the end corner.
    pub fn is_normalized(&self) -> bool {
        self.start_x <= self.end_x && self.start_y <= self.end_y
    }

    /// Inclusive area `(x2 - x1 + 1) * (y2 - y1 + 1)`.
    ///
    /// Degenerate rectangles are not clamped and may report zero or a
    /// negative area.
    pub fn area(&self) -> f32 {
        let w = self.end_x as f32 - self.start_x as f32 + 1.0;
        let h = self.end_y as f32 - self.start_y as f32 + 1.0;
        w * h
    }

    /// Inclusive intersection area with `other`, clamped to zero per axis.
    pub fn intersection_area(&self, other: &Rectangle) -> f32 {
        let xx1 = self.start_x.max(other.start_x) as f32;
        let yy1 = self.start_y.max(other.start_y) as f32;
        let xx2 = self.end_x.min(other.end_x) as f32;
        let yy2 = self.end_y.min(other.end_y) as f32;

        let w = (xx2 - xx1 + 1.0).max(0.0);
        let h = (yy2 - yy1 + 1.0).max(0.0);
        w * h
    }

    /// Overlap of `other` measured against this rectangle's own area.
    ///
    /// This is not IoU and not symmetric: `a.overlap_ratio(&b)` and
    /// `b.overlap_ratio(&a)` share a numerator but divide by different areas.
    pub fn overlap_ratio(&self, other: &Rectangle) -> f32 {
        self.intersection_area(other) / self.area()
    }

    /// Maps the rectangle back to original image coordinates.
    ///
    /// Coordinates are truncated toward zero after scaling.
    pub fn scale(&self, ratio: &ResizeRatio) -> Self {
        Self {
            start_x: (self.start_x as f32 * ratio.ratio_w) as i32,
            start_y: (self.start_y as f32 * ratio.ratio_h) as i32,
            end_x: (self.end_x as f32 * ratio.ratio_w) as i32,
            end_y: (self.end_y as f32 * ratio.ratio_h) as i32,
        }
    }

    /// Returns the corners as a `[x1, y1, x2, y2]` array.
    pub fn to_array(&self) -> [i32; 4] {
        [self.start_x, self.start_y, self.end_x, self.end_y]
    }
}

impl From<(i32, i32, i32, i32)> for Rectangle {
    fn from((start_x, start_y, end_x, end_y): (i32, i32, i32, i32)) -> Self {
        Self::new(start_x, start_y, end_x, end_y)
    }
}

impl From<Rectangle> for (i32, i32, i32, i32) {
    fn from(r: Rectangle) -> Self {
        (r.start_x, r.start_y, r.end_x, r.end_y)
    }
}
