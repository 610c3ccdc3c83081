//! Structures and helpers for ONNX Runtime inference.
//!
//! This module hosts the engine that runs the frozen classification graph
//! and adapts it to the [`ScoringGraph`](crate::core::traits::ScoringGraph)
//! seam used by the prediction engine.

pub mod ort_infer;

pub use ort_infer::OrtInfer;
