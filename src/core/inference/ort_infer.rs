//! ONNX Runtime host for the frozen classification graph.

use crate::core::{batch::Tensor2D, batch::Tensor4D, errors::EvalError};
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// A loaded graph plus the names of the tensors it is driven through.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex
/// even though evaluation is single-threaded.
pub struct OrtInfer {
    pub(super) session: Mutex<Session>,
    pub(super) input_name: String,
    pub(super) output_name: String,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Returns the declared shape of the configured output tensor.
    ///
    /// Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn output_shape(&self) -> Option<Vec<i64>> {
        let session = self.session.lock().ok()?;
        let output = session
            .outputs
            .iter()
            .find(|output| output.name == self.output_name)?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Returns the number of classes the graph declares for its output, if static.
    pub fn declared_classes(&self) -> Option<usize> {
        let shape = self.output_shape()?;
        match shape.last() {
            Some(&dim) if dim > 0 => Some(dim as usize),
            _ => None,
        }
    }
}

impl crate::core::traits::ScoringGraph for OrtInfer {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, EvalError> {
        self.infer_2d(input)
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn declared_classes(&self) -> Option<usize> {
        OrtInfer::declared_classes(self)
    }
}
