//! Configuration management for the pipeline.
//!
//! This module provides configuration types, validation traits, and utilities
//! for managing runtime and inference configuration.

pub mod errors;
pub mod onnx;
pub mod parallel;

pub use errors::{ConfigError, ConfigValidator};
pub use onnx::*;
pub use parallel::ParallelPolicy;
