//! Decoding of EAST-style detector output into text rectangles.
//!
//! The detector emits, for every cell of a grid at 1/4 input resolution, a
//! text confidence and a rotated box described by its distances to the four
//! edges plus an angle. [`decode`] turns every confident cell into an
//! axis-aligned [`Rectangle`]; it does not deduplicate. Neighbouring cells on
//! the same word produce near-identical rectangles, which
//! [`crate::processors::nms`] collapses afterwards.

use crate::core::OCRError;
use crate::core::constants::{EAST_STRIDE, GEO_ANGLE, GEO_BOTTOM, GEO_LEFT, GEO_RIGHT, GEO_TOP};
use crate::core::traits::DetectorOutput;
use crate::core::validation::{validate_confidence, validate_detector_maps};
use crate::processors::geometry::Rectangle;
use ndarray::{ArrayView4, Axis};

/// Candidate rectangles and their confidences, index-aligned and in
/// row-major cell order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedRegions {
    /// One rectangle per confident cell.
    pub rectangles: Vec<Rectangle>,
    /// The raw score of the cell that produced `rectangles[i]`.
    pub confidences: Vec<f32>,
}

impl DecodedRegions {
    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.rectangles.len()
    }

    /// Returns `true` if no cell passed the confidence gate.
    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// Iterates over `(rectangle, confidence)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Rectangle, f32)> {
        self.rectangles.iter().zip(self.confidences.iter().copied())
    }
}

/// Decodes a score map and geometry map into candidate rectangles.
///
/// Cells are visited row by row (`y` outer, `x` inner); cells scoring below
/// `min_confidence` are skipped. For a cell at `(y, x)` with angle `a` and
/// edge distances `t, r, b, l`:
///
/// ```text
/// end_x   = x * 4 + cos(a) * r + sin(a) * b
/// end_y   = y * 4 + cos(a) * b - sin(a) * r
/// start_x = end_x - (r + l)
/// start_y = end_y - (t + b)
/// ```
///
/// Every coordinate is truncated toward zero; `start_*` is derived from the
/// already truncated `end_*`.
///
/// # Errors
///
/// * [`OCRError::InvalidConfidence`] if `min_confidence` is outside `[0, 1]`.
/// * [`OCRError::InvalidInputShape`] if the maps are not `[N, 1, H, W]` and
///   `[N, 5, H, W]` over the same grid.
pub fn decode(
    scores: ArrayView4<'_, f32>,
    geometry: ArrayView4<'_, f32>,
    min_confidence: f32,
) -> Result<DecodedRegions, OCRError> {
    validate_confidence(min_confidence)?;
    validate_detector_maps(scores.shape(), geometry.shape())?;

    let scores = scores.index_axis(Axis(0), 0);
    let scores = scores.index_axis(Axis(0), 0);
    let geometry = geometry.index_axis(Axis(0), 0);
    let (rows, cols) = scores.dim();

    let mut regions = DecodedRegions::default();

    for y in 0..rows {
        let offset_y = y as f64 * EAST_STRIDE as f64;

        for x in 0..cols {
            let score = scores[[y, x]];
            if score < min_confidence {
                continue;
            }

            let offset_x = x as f64 * EAST_STRIDE as f64;

            let angle = geometry[[GEO_ANGLE, y, x]];
            let cos = angle.cos();
            let sin = angle.sin();

            let top = geometry[[GEO_TOP, y, x]];
            let right = geometry[[GEO_RIGHT, y, x]];
            let bottom = geometry[[GEO_BOTTOM, y, x]];
            let left = geometry[[GEO_LEFT, y, x]];

            let box_h = top + bottom;
            let box_w = right + left;

            let end_x = (offset_x + (cos * right) as f64 + (sin * bottom) as f64) as i32;
            let end_y = (offset_y + (cos * bottom) as f64 - (sin * right) as f64) as i32;
            let start_x = (end_x as f64 - box_w as f64) as i32;
            let start_y = (end_y as f64 - box_h as f64) as i32;

            regions
                .rectangles
                .push(Rectangle::new(start_x, start_y, end_x, end_y));
            regions.confidences.push(score);
        }
    }

    tracing::debug!(
        "Decoded {} candidate regions from {}x{} grid (min_confidence={})",
        regions.len(),
        rows,
        cols,
        min_confidence
    );

    Ok(regions)
}

/// Decodes a [`DetectorOutput`] pair. See [`decode`].
pub fn decode_output(
    output: &DetectorOutput,
    min_confidence: f32,
) -> Result<DecodedRegions, OCRError> {
    decode(output.scores.view(), output.geometry.view(), min_confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    /// Builds a `rows × cols` pair where every cell shares the same geometry.
    fn uniform_maps(
        rows: usize,
        cols: usize,
        score: f32,
        geo: [f32; 5],
    ) -> (Array4<f32>, Array4<f32>) {
        let scores = Array4::from_elem((1, 1, rows, cols), score);
        let mut geometry = Array4::<f32>::zeros((1, 5, rows, cols));
        for (c, v) in geo.iter().enumerate() {
            geometry.index_axis_mut(Axis(1), c).fill(*v);
        }
        (scores, geometry)
    }

    #[test]
    fn test_single_cell_example() {
        let (scores, geometry) = uniform_maps(1, 1, 0.9, [4.0, 4.0, 4.0, 4.0, 0.0]);
        let regions = decode(scores.view(), geometry.view(), 0.2).unwrap();

        assert_eq!(regions.rectangles, vec![Rectangle::new(-4, -4, 4, 4)]);
        assert_eq!(regions.confidences, vec![0.9]);
    }

    #[test]
    fn test_confidence_gate_skips_cells() {
        let (mut scores, geometry) = uniform_maps(2, 3, 0.1, [1.0, 1.0, 1.0, 1.0, 0.0]);
        scores[[0, 0, 0, 2]] = 0.7;
        scores[[0, 0, 1, 0]] = 0.5;
        // exactly at the gate passes
        scores[[0, 0, 1, 1]] = 0.4;

        let regions = decode(scores.view(), geometry.view(), 0.4).unwrap();
        assert_eq!(regions.len(), 3);
        assert_eq!(regions.confidences, vec![0.7, 0.5, 0.4]);
        assert!(regions.confidences.iter().all(|&c| c >= 0.4));
    }

    #[test]
    fn test_row_major_order_and_alignment() {
        let (mut scores, geometry) = uniform_maps(2, 2, 0.0, [0.0, 2.0, 2.0, 0.0, 0.0]);
        scores[[0, 0, 0, 1]] = 0.6;
        scores[[0, 0, 1, 0]] = 0.8;
        scores[[0, 0, 1, 1]] = 0.7;

        let regions = decode(scores.view(), geometry.view(), 0.5).unwrap();
        assert_eq!(regions.rectangles.len(), regions.confidences.len());

        // (y=0, x=1), then (y=1, x=0), then (y=1, x=1)
        assert_eq!(
            regions.rectangles,
            vec![
                Rectangle::new(4, 0, 6, 2),
                Rectangle::new(0, 4, 2, 6),
                Rectangle::new(4, 4, 6, 6),
            ]
        );
        assert_eq!(regions.confidences, vec![0.6, 0.8, 0.7]);
    }

    #[test]
    fn test_truncation_toward_zero() {
        let (mut scores, geometry) = uniform_maps(1, 2, 0.0, [0.4, 2.7, 1.5, 0.6, 0.0]);
        scores[[0, 0, 0, 1]] = 1.0;

        let regions = decode(scores.view(), geometry.view(), 0.5).unwrap();
        // end_x = 4 + 2.7 -> 6, end_y = 1.5 -> 1,
        // start_x = 6 - 3.3 -> 2, start_y = 1 - 1.9 = -0.9 -> 0
        assert_eq!(regions.rectangles, vec![Rectangle::new(2, 0, 6, 1)]);
    }

    #[test]
    fn test_rotated_cell() {
        let angle = std::f32::consts::FRAC_PI_2;
        let (scores, geometry) = uniform_maps(1, 1, 1.0, [2.0, 3.0, 5.0, 1.0, angle]);

        let regions = decode(scores.view(), geometry.view(), 0.5).unwrap();
        // cos is a tiny negative number at f32 pi/2, so end_x lands just under 5
        // and end_y just under -3; both truncate toward zero.
        assert_eq!(regions.rectangles, vec![Rectangle::new(0, -10, 4, -3)]);
    }

    #[test]
    fn test_all_below_threshold_is_empty() {
        let (scores, geometry) = uniform_maps(4, 4, 0.1, [1.0, 1.0, 1.0, 1.0, 0.0]);
        let regions = decode(scores.view(), geometry.view(), 0.5).unwrap();
        assert!(regions.is_empty());
        assert!(regions.confidences.is_empty());
    }

    #[test]
    fn test_only_first_batch_entry_is_decoded() {
        let scores = Array4::from_elem((2, 1, 1, 1), 0.9);
        let geometry = Array4::<f32>::zeros((2, 5, 1, 1));
        let regions = decode(scores.view(), geometry.view(), 0.5).unwrap();
        assert_eq!(regions.len(), 1);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let scores = Array4::from_elem((1, 1, 2, 2), 0.9);
        let geometry = Array4::<f32>::zeros((1, 5, 2, 3));
        let err = decode(scores.view(), geometry.view(), 0.5).unwrap_err();
        assert!(matches!(err, OCRError::InvalidInputShape { .. }));

        let geometry = Array4::<f32>::zeros((1, 4, 2, 2));
        let err = decode(scores.view(), geometry.view(), 0.5).unwrap_err();
        assert!(matches!(err, OCRError::InvalidInputShape { .. }));
    }

    #[test]
    fn test_invalid_confidence_is_rejected() {
        let (scores, geometry) = uniform_maps(1, 1, 0.9, [1.0, 1.0, 1.0, 1.0, 0.0]);
        let err = decode(scores.view(), geometry.view(), 1.5).unwrap_err();
        assert!(matches!(err, OCRError::InvalidConfidence { .. }));
    }

    #[test]
    fn test_decode_output() {
        let (scores, geometry) = uniform_maps(1, 1, 0.9, [4.0, 4.0, 4.0, 4.0, 0.0]);
        let output = DetectorOutput::new(scores, geometry);
        let regions = decode_output(&output, 0.2).unwrap();
        assert_eq!(regions.iter().count(), 1);
    }

    /// Small deterministic generator for randomized grids.
    struct Lcg(u64);

    impl Lcg {
        fn next_f32(&mut self) -> f32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 40) as f32 / (1u64 << 24) as f32
        }

        fn below(&mut self, n: usize) -> usize {
            ((self.next_f32() * n as f32) as usize).min(n - 1)
        }
    }

    #[test]
    fn test_generated_grids_gate_and_align() {
        let mut rng = Lcg(7);
        for _ in 0..200 {
            let rows = 1 + rng.below(8);
            let cols = 1 + rng.below(8);
            let min_confidence = rng.next_f32();

            let mut scores = Array4::<f32>::zeros((1, 1, rows, cols));
            scores.mapv_inplace(|_| rng.next_f32());
            let mut geometry = Array4::<f32>::zeros((1, 5, rows, cols));
            geometry.mapv_inplace(|_| rng.next_f32() * 40.0);

            let decoded = decode(scores.view(), geometry.view(), min_confidence).unwrap();
            assert_eq!(decoded.rectangles.len(), decoded.confidences.len());

            let passing: Vec<f32> = scores
                .iter()
                .copied()
                .filter(|&s| s >= min_confidence)
                .collect();
            // row-major order, exact scores, nothing below the gate
            assert_eq!(decoded.confidences, passing);
        }
    }
}
