//! Core traits for the evaluation pipeline.

use crate::core::batch::{Tensor2D, Tensor4D};
use crate::core::errors::EvalError;

/// A frozen graph that turns a preprocessed batch into per-class scores.
///
/// [`OrtInfer`](crate::core::inference::OrtInfer) is the production
/// implementation. The graph is treated as a black box: implementors only
/// map an input batch to a `[batch, classes]` score matrix.
pub trait ScoringGraph {
    /// Scores a `[batch, height, width, channels]` tensor.
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, EvalError>;

    /// A short name for logs and error messages.
    fn name(&self) -> &str;

    /// The number of classes the graph declares, when known before scoring.
    fn declared_classes(&self) -> Option<usize> {
        None
    }
}

impl<G: ScoringGraph + ?Sized> ScoringGraph for &G {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, EvalError> {
        (**self).score(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn declared_classes(&self) -> Option<usize> {
        (**self).declared_classes()
    }
}

impl<G: ScoringGraph + ?Sized> ScoringGraph for Box<G> {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, EvalError> {
        (**self).score(input)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn declared_classes(&self) -> Option<usize> {
        (**self).declared_classes()
    }
}
