//! Utility functions for the pipeline.
//!
//! This module provides image loading and resizing helpers, annotated output
//! rendering, and logging setup.

pub mod image;
#[cfg(feature = "visualization")]
pub mod visualization;

pub use image::{dynamic_to_rgb, is_supported_image, load_image, resize_image};

/// Initializes the tracing subscriber for logging.
///
/// Sets up the tracing subscriber with an environment filter (`RUST_LOG`,
/// defaulting to `info`) and a formatting layer. Call once at the start of
/// an application.
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
