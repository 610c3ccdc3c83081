//! Per-record scoring: preprocessing followed by the graph.

use crate::core::errors::{EvalError, EvalResult, SimpleError};
use crate::core::traits::ScoringGraph;
use crate::dataset::ManifestRecord;
use crate::pipeline::ImagePipeline;

/// Per-class scores for one image, in graph output order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector(Vec<f32>);

impl ProbabilityVector {
    /// Wraps raw scores.
    pub fn new(scores: Vec<f32>) -> Self {
        Self(scores)
    }

    /// Number of scores.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no scores.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The scores as a slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Index of the highest score.
    ///
    /// Ties go to the lowest index. A NaN score only wins when no other score
    /// is a number. Returns `None` for an empty vector.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &score) in self.0.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score || score.is_nan() => {}
                _ => best = Some((idx, score)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}

impl From<Vec<f32>> for ProbabilityVector {
    fn from(scores: Vec<f32>) -> Self {
        Self(scores)
    }
}

/// Turns a manifest record into a probability vector.
///
/// Holds the pipeline and the graph; nothing is cached between calls, so a
/// path listed twice is loaded and scored twice.
#[derive(Debug)]
pub struct PredictionEngine<G> {
    pipeline: ImagePipeline,
    graph: G,
}

impl<G: ScoringGraph> PredictionEngine<G> {
    /// Composes a pipeline with a graph.
    pub fn new(pipeline: ImagePipeline, graph: G) -> Self {
        Self { pipeline, graph }
    }

    /// The preprocessing pipeline.
    pub fn pipeline(&self) -> &ImagePipeline {
        &self.pipeline
    }

    /// The scoring graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Preprocesses and scores the image named by `record`.
    pub fn predict(&self, record: &ManifestRecord) -> EvalResult<ProbabilityVector> {
        let input = self.pipeline.run(record.image_path())?;
        let scores = self.graph.score(&input)?;

        if scores.nrows() != 1 {
            return Err(EvalError::inference_error(
                self.graph.name(),
                &format!(
                    "expected scores for exactly one image, got shape {:?}",
                    scores.shape()
                ),
                SimpleError::new("unexpected batch size in graph output"),
            ));
        }

        Ok(ProbabilityVector::new(scores.row(0).to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Tensor2D, Tensor4D};
    use image::{Rgb, RgbImage};
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records the shape of every input and answers with fixed scores.
    struct RecordingGraph {
        scores: Vec<f32>,
        rows: usize,
        seen: RefCell<Vec<Vec<usize>>>,
    }

    impl ScoringGraph for RecordingGraph {
        fn score(&self, input: &Tensor4D) -> Result<Tensor2D, EvalError> {
            self.seen.borrow_mut().push(input.shape().to_vec());
            let mut data = Vec::new();
            for _ in 0..self.rows {
                data.extend_from_slice(&self.scores);
            }
            Ok(Tensor2D::from_shape_vec((self.rows, self.scores.len()), data)?)
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn setup(rows: usize) -> (TempDir, PredictionEngine<RecordingGraph>) {
        let dir = TempDir::new().unwrap();
        RgbImage::from_pixel(300, 200, Rgb([9, 9, 9]))
            .save(dir.path().join("a.png"))
            .unwrap();
        let pipeline = ImagePipeline::builder()
            .images_dir(dir.path())
            .build()
            .unwrap();
        let graph = RecordingGraph {
            scores: vec![0.1, 0.7, 0.2],
            rows,
            seen: RefCell::new(Vec::new()),
        };
        (dir, PredictionEngine::new(pipeline, graph))
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_ties() {
        assert_eq!(ProbabilityVector::new(vec![0.2, 0.5, 0.5, 0.1]).argmax(), Some(1));
        assert_eq!(ProbabilityVector::new(vec![0.3, 0.3, 0.3]).argmax(), Some(0));
        assert_eq!(ProbabilityVector::new(vec![]).argmax(), None);
    }

    #[test]
    fn test_argmax_ignores_nan_after_first() {
        assert_eq!(ProbabilityVector::new(vec![0.1, f32::NAN, 0.4]).argmax(), Some(2));
    }

    #[test]
    fn test_predict_feeds_pipeline_output_to_graph() {
        let (_dir, engine) = setup(1);
        let record = ManifestRecord::new("a.png", "whatever").unwrap();

        let probs = engine.predict(&record).unwrap();
        assert_eq!(probs.as_slice(), &[0.1, 0.7, 0.2]);
        assert_eq!(engine.graph().seen.borrow()[0], vec![1, 224, 224, 3]);
    }

    #[test]
    fn test_predict_does_not_cache() {
        let (_dir, engine) = setup(1);
        let record = ManifestRecord::new("a.png", "x").unwrap();
        engine.predict(&record).unwrap();
        engine.predict(&record).unwrap();
        assert_eq!(engine.graph().seen.borrow().len(), 2);
    }

    #[test]
    fn test_predict_rejects_multi_row_output() {
        let (_dir, engine) = setup(2);
        let record = ManifestRecord::new("a.png", "x").unwrap();
        assert!(matches!(
            engine.predict(&record),
            Err(EvalError::Inference { .. })
        ));
    }

    #[test]
    fn test_predict_missing_image_never_reaches_graph() {
        let (_dir, engine) = setup(1);
        let record = ManifestRecord::new("missing.png", "x").unwrap();
        assert!(matches!(
            engine.predict(&record),
            Err(EvalError::ImageLoad { .. })
        ));
        assert!(engine.graph().seen.borrow().is_empty());
    }
}
