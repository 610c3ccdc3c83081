//! Prediction: scoring records and naming the winning class.

pub mod engine;
pub mod resolver;

pub use engine::{PredictionEngine, ProbabilityVector};
pub use resolver::{Candidate, LabelResolver};
