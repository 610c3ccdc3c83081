//! Configuration management for evaluation runs.
//!
//! This module provides the run configuration, ONNX Runtime session settings,
//! and the validation traits shared by both.

pub mod errors;
pub mod eval;
pub mod onnx;

pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use eval::{EvalConfig, FailurePolicy};
pub use onnx::{OrtGraphOptimizationLevel, OrtSessionConfig};
