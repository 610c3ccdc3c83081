//! Mapping score vectors to class labels.

use crate::core::errors::{EvalError, EvalResult};
use crate::dataset::LabelTable;
use crate::predictor::engine::ProbabilityVector;
use std::cmp::Ordering;

/// One ranked class for a prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    /// Class index in graph output order.
    pub index: usize,
    /// Score the graph gave this class.
    pub score: f32,
    /// Label of the class.
    pub label: &'a str,
}

/// Resolves probability vectors against a [`LabelTable`].
#[derive(Debug, Clone)]
pub struct LabelResolver {
    labels: LabelTable,
}

impl LabelResolver {
    /// Creates a resolver over `labels`.
    pub fn new(labels: LabelTable) -> Self {
        Self { labels }
    }

    /// The label table.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    fn check_len(&self, probs: &ProbabilityVector) -> EvalResult<()> {
        if probs.len() != self.labels.len() {
            return Err(EvalError::LabelMismatch {
                labels: self.labels.len(),
                scores: probs.len(),
            });
        }
        Ok(())
    }

    /// Returns the label of the highest score; ties go to the lowest index.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::LabelMismatch` if the vector and the table differ in length.
    pub fn resolve(&self, probs: &ProbabilityVector) -> EvalResult<&str> {
        self.check_len(probs)?;
        probs
            .argmax()
            .and_then(|idx| self.labels.get(idx))
            .ok_or_else(|| EvalError::invalid_input("cannot resolve an empty score vector"))
    }

    /// Returns the `k` best candidates, highest score first.
    ///
    /// Equal scores keep index order and NaN scores rank last, so the first
    /// candidate is always the class [`resolve`](Self::resolve) picks. `k`
    /// larger than the number of classes returns every class.
    pub fn top_k(&self, probs: &ProbabilityVector, k: usize) -> EvalResult<Vec<Candidate<'_>>> {
        self.check_len(probs)?;

        let mut indexed_scores: Vec<(usize, f32)> =
            probs.as_slice().iter().copied().enumerate().collect();
        // Stable sort, so ties stay in index order
        indexed_scores.sort_by(|a, b| descending_nan_last(a.1, b.1));

        Ok(indexed_scores
            .into_iter()
            .take(k)
            .filter_map(|(index, score)| {
                self.labels.get(index).map(|label| Candidate {
                    index,
                    score,
                    label,
                })
            })
            .collect())
    }
}

fn descending_nan_last(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
