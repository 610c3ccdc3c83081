//! Core building blocks shared by every stage of an evaluation run.
//!
//! * [`errors`] - the crate error type and result alias
//! * [`config`] - run configuration and validation
//! * [`constants`] - graph contract values and default paths
//! * [`inference`] - ONNX Runtime hosting of the frozen graph
//! * [`traits`] - the [`ScoringGraph`] seam

pub mod batch;
pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;

pub use batch::{Tensor2D, Tensor4D};
pub use config::{
    ConfigError, ConfigValidator, ConfigValidatorExt, EvalConfig, FailurePolicy,
    OrtGraphOptimizationLevel, OrtSessionConfig,
};
pub use errors::{EvalError, EvalResult, ProcessingStage, SimpleError};
pub use inference::OrtInfer;
pub use traits::ScoringGraph;
