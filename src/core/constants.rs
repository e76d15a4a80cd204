//! Constants shared across the pipeline.
//!
//! The tensor layout constants describe the fixed output contract of an
//! EAST-style detection network. They are properties of the network
//! architecture, not tuning knobs.

/// Downsampling factor between the detector's output grid and input pixels.
pub const EAST_STRIDE: f32 = 4.0;

/// Number of channels in the score map.
pub const SCORE_CHANNELS: usize = 1;

/// Number of channels in the geometry map.
pub const GEOMETRY_CHANNELS: usize = 5;

/// Geometry channel holding the distance to the top edge.
pub const GEO_TOP: usize = 0;
/// Geometry channel holding the distance to the right edge.
pub const GEO_RIGHT: usize = 1;
/// Geometry channel holding the distance to the bottom edge.
pub const GEO_BOTTOM: usize = 2;
/// Geometry channel holding the distance to the left edge.
pub const GEO_LEFT: usize = 3;
/// Geometry channel holding the rotation angle in radians.
pub const GEO_ANGLE: usize = 4;

/// Default minimum confidence for a grid cell to become a candidate.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Default overlap threshold used by the suppressor.
pub const DEFAULT_OVERLAP_THRESHOLD: f32 = 0.3;

/// Default detector input width. Must be a multiple of 32.
pub const DEFAULT_INPUT_WIDTH: u32 = 320;

/// Default detector input height. Must be a multiple of 32.
pub const DEFAULT_INPUT_HEIGHT: u32 = 320;

/// Required divisor of the detector input dimensions.
pub const INPUT_SIZE_DIVISOR: u32 = 32;

/// Per-channel means (R, G, B) subtracted when building the detector input blob.
pub const EAST_MEAN_RGB: [f32; 3] = [123.68, 116.78, 103.94];

/// File extensions picked up by directory processing.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tif", "tiff", "webp"];
