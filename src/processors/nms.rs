//! Greedy overlap suppression for candidate text rectangles.
//!
//! Adjacent detector cells fire on the same word and yield clusters of
//! near-identical rectangles. Suppression keeps the highest ranked rectangle
//! of each cluster and discards the others.
//!
//! Ranking is by confidence when scores are supplied. Without scores the
//! rectangles are ranked by their bottom edge (`end_y`), so the lowest box
//! on the page wins.

use crate::core::OCRError;
use crate::core::validation::{validate_overlap_threshold, validate_same_length};
use crate::processors::geometry::Rectangle;

/// Runs suppression and returns the surviving rectangles in pick order
/// (highest ranked first).
///
/// See [`suppress_indices`] for the algorithm and errors.
pub fn suppress(
    rectangles: &[Rectangle],
    scores: Option<&[f32]>,
    overlap_threshold: f32,
) -> Result<Vec<Rectangle>, OCRError> {
    let picked = suppress_indices(rectangles, scores, overlap_threshold)?;
    Ok(picked.into_iter().map(|i| rectangles[i]).collect())
}

/// Runs suppression and returns the indices of surviving rectangles in pick
/// order, so callers can carry per-rectangle data (such as confidences)
/// alongside.
///
/// The worklist is sorted ascending by rank with a stable sort. Each round
/// pops the last (best) index, then drops every remaining index whose
/// overlap with the picked rectangle, measured against the **picked**
/// rectangle's inclusive area, is strictly greater than `overlap_threshold`.
/// Among equal scores the one sorted last wins. Scores are ranked with
/// [`f32::total_cmp`], so a positive NaN outranks every number and a
/// negative NaN ranks below every number.
///
/// Degenerate rectangles are not filtered; they take part with whatever area
/// the inclusive formula gives them.
///
/// # Errors
///
/// * [`OCRError::InvalidThreshold`] if `overlap_threshold` is not in `(0, 1]`.
/// * [`OCRError::LengthMismatch`] if `scores` is given with a different length.
pub fn suppress_indices(
    rectangles: &[Rectangle],
    scores: Option<&[f32]>,
    overlap_threshold: f32,
) -> Result<Vec<usize>, OCRError> {
    validate_overlap_threshold(overlap_threshold)?;
    if let Some(scores) = scores {
        validate_same_length(rectangles, scores)?;
    }

    if rectangles.is_empty() {
        return Ok(Vec::new());
    }

    let mut worklist: Vec<usize> = (0..rectangles.len()).collect();
    match scores {
        Some(scores) => worklist.sort_by(|&a, &b| scores[a].total_cmp(&scores[b])),
        None => worklist.sort_by_key(|&i| rectangles[i].end_y),
    }

    let mut picked = Vec::new();
    while let Some(i) = worklist.pop() {
        picked.push(i);
        let chosen = &rectangles[i];
        worklist.retain(|&j| !(chosen.overlap_ratio(&rectangles[j]) > overlap_threshold));
    }

    tracing::debug!(
        "Suppression kept {} of {} rectangles (threshold={})",
        picked.len(),
        rectangles.len(),
        overlap_threshold
    );

    Ok(picked)
}
