//! Post-processing for detector output.
//!
//! The pipeline runs in dependency order:
//!
//! 1. [`east_decode`] turns score and geometry maps into candidate rectangles.
//! 2. [`geometry::Rectangle::scale`] maps them back through a [`ResizeRatio`].
//! 3. [`nms`] collapses overlapping candidates.

pub mod east_decode;
pub mod geometry;
pub mod nms;
pub mod types;

pub use east_decode::{DecodedRegions, decode, decode_output};
pub use geometry::Rectangle;
pub use nms::{suppress, suppress_indices};
pub use types::{ResizeRatio, TensorLayout};
