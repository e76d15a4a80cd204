//! Text detection models.

pub mod east;

pub use east::{EastDetector, EastDetectorConfig};
