//! The reporting loop.
//!
//! Every manifest record is scored, its top label resolved and compared with
//! the expected label, and one line is written per record:
//!
//! ```text
//! [broccoli.jpg]: broccoli
//! [canoe.jpg]: paddle ***WRONG***
//! ```
//!
//! Counts are returned as a [`ReportSummary`] and are never written to the
//! report stream.

use crate::core::config::FailurePolicy;
use crate::core::constants::{DEFAULT_TOPK, WRONG_MARKER};
use crate::core::errors::EvalResult;
use crate::core::traits::ScoringGraph;
use crate::dataset::{Manifest, ManifestRecord};
use crate::predictor::{LabelResolver, PredictionEngine};
use std::fmt;
use std::io::Write;
use tracing::{debug, error};

/// The outcome for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    /// Position of the record in the manifest, starting at 0.
    pub record_index: usize,
    /// Image path as written in the manifest.
    pub image_path: String,
    /// Label of the highest-scoring class.
    pub predicted_label: String,
    /// Label the manifest expects.
    pub expected_label: String,
    /// Whether the two labels are exactly equal.
    pub correct: bool,
}

impl Prediction {
    /// Builds a prediction; correctness is exact, case-sensitive equality.
    pub fn new(record_index: usize, record: &ManifestRecord, predicted_label: &str) -> Self {
        Self {
            record_index,
            image_path: record.image_path().to_string(),
            predicted_label: predicted_label.to_string(),
            expected_label: record.expected_label().to_string(),
            correct: predicted_label == record.expected_label(),
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.image_path, self.predicted_label)?;
        if !self.correct {
            write!(f, " {WRONG_MARKER}")?;
        }
        Ok(())
    }
}

/// Counts gathered over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Records that produced a report line.
    pub processed: usize,
    /// Records whose prediction matched.
    pub correct: usize,
    /// Records whose prediction did not match.
    pub wrong: usize,
    /// Records skipped because they failed.
    pub failed: usize,
}

impl ReportSummary {
    /// Fraction of processed records predicted correctly.
    pub fn accuracy(&self) -> Option<f64> {
        (self.processed > 0).then(|| self.correct as f64 / self.processed as f64)
    }

    fn record(&mut self, prediction: &Prediction) {
        self.processed += 1;
        if prediction.correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }
}

/// Runs the engine over a manifest and writes the report.
#[derive(Debug)]
pub struct ReportLoop<G> {
    engine: PredictionEngine<G>,
    resolver: LabelResolver,
    policy: FailurePolicy,
}

impl<G: ScoringGraph> ReportLoop<G> {
    /// Creates a loop that aborts on the first failing record.
    pub fn new(engine: PredictionEngine<G>, resolver: LabelResolver) -> Self {
        Self {
            engine,
            resolver,
            policy: FailurePolicy::Abort,
        }
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Scores and resolves a single record.
    pub fn evaluate(&self, record_index: usize, record: &ManifestRecord) -> EvalResult<Prediction> {
        let probs = self.engine.predict(record)?;
        let predicted = self.resolver.resolve(&probs)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            for candidate in self.resolver.top_k(&probs, DEFAULT_TOPK)? {
                debug!(
                    image = record.image_path(),
                    index = candidate.index,
                    score = candidate.score,
                    label = candidate.label,
                    "candidate"
                );
            }
        }

        Ok(Prediction::new(record_index, record, predicted))
    }

    /// Writes one line per record to `out`, in manifest order.
    ///
    /// With [`FailurePolicy::Abort`] the first error is returned and nothing
    /// further is written. With [`FailurePolicy::Skip`] image and inference
    /// errors are logged and counted; a label table mismatch still aborts.
    pub fn run<W: Write>(&self, manifest: &Manifest, out: &mut W) -> EvalResult<ReportSummary> {
        let mut summary = ReportSummary::default();

        for (record_index, record) in manifest.iter().enumerate() {
            match self.evaluate(record_index, record) {
                Ok(prediction) => {
                    writeln!(out, "{prediction}")?;
                    summary.record(&prediction);
                }
                Err(e) if self.policy == FailurePolicy::Skip && e.is_record_failure() => {
                    error!(
                        image = record.image_path(),
                        error = %e,
                        "skipping record {}",
                        record_index
                    );
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        out.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::EvalError;
    use crate::core::{Tensor2D, Tensor4D};
    use crate::dataset::LabelTable;
    use crate::pipeline::ImagePipeline;
    use image::{Rgb, RgbImage};
    use std::path::Path;
    use tempfile::TempDir;

    /// Always answers with the same scores.
    struct FixedGraph(Vec<f32>);

    impl ScoringGraph for FixedGraph {
        fn score(&self, _input: &Tensor4D) -> Result<Tensor2D, EvalError> {
            Ok(Tensor2D::from_shape_vec((1, self.0.len()), self.0.clone())?)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn one_hot(len: usize, hot: usize) -> Vec<f32> {
        (0..len).map(|i| if i == hot { 1.0 } else { 0.0 }).collect()
    }

    fn write_solid(dir: &Path, name: &str) {
        RgbImage::from_pixel(64, 48, Rgb([200, 30, 30]))
            .save(dir.join(name))
            .unwrap();
    }

    fn report_loop(dir: &Path, labels: &str, scores: Vec<f32>) -> ReportLoop<FixedGraph> {
        let pipeline = ImagePipeline::builder().images_dir(dir).build().unwrap();
        let engine = PredictionEngine::new(pipeline, FixedGraph(scores));
        let resolver = LabelResolver::new(LabelTable::parse(labels).unwrap());
        ReportLoop::new(engine, resolver)
    }

    fn run_to_string(
        report: &ReportLoop<FixedGraph>,
        manifest: &Manifest,
    ) -> (EvalResult<ReportSummary>, String) {
        let mut out = Vec::new();
        let result = report.run(manifest, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_round_trip_prints_one_hot_label() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "red.png");
        let report = report_loop(dir.path(), "cat\ndog\nbird\nfish", one_hot(4, 2));
        let manifest = Manifest::parse("red.png\tbird\n").unwrap();

        let (result, output) = run_to_string(&report, &manifest);
        let summary = result.unwrap();

        assert_eq!(output.lines().count(), 1);
        assert_eq!(output, "[red.png]: bird\n");
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.accuracy(), Some(1.0));
    }

    #[test]
    fn test_mismatch_is_marked_wrong() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "pet.png");
        let report = report_loop(dir.path(), "cat\ndog", one_hot(2, 1));
        let manifest = Manifest::parse("pet.png\tcat\n").unwrap();

        let (result, output) = run_to_string(&report, &manifest);
        assert_eq!(output, "[pet.png]: dog ***WRONG***\n");
        assert_eq!(result.unwrap().wrong, 1);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "pet.png");
        let report = report_loop(dir.path(), "cat\ndog", one_hot(2, 1));
        let manifest = Manifest::parse("pet.png\tdog\npet.png\tDog\n").unwrap();

        let (_, output) = run_to_string(&report, &manifest);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["[pet.png]: dog", "[pet.png]: dog ***WRONG***"]);
    }

    #[test]
    fn test_prediction_display() {
        let record = ManifestRecord::new("a.jpg", "cat").unwrap();
        assert_eq!(Prediction::new(0, &record, "cat").to_string(), "[a.jpg]: cat");
        assert_eq!(
            Prediction::new(0, &record, "dog").to_string(),
            "[a.jpg]: dog ***WRONG***"
        );
    }

    #[test]
    fn test_label_mismatch_aborts_before_printing() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "a.png");
        let report = report_loop(dir.path(), "a\nb\nc\nd\ne", vec![0.2, 0.5, 0.3])
            .with_failure_policy(FailurePolicy::Skip);
        let manifest = Manifest::parse("a.png\tb\n").unwrap();

        let (result, output) = run_to_string(&report, &manifest);
        assert!(matches!(
            result,
            Err(EvalError::LabelMismatch {
                labels: 5,
                scores: 3
            })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_abort_policy_stops_at_bad_image() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "good.png");
        let report = report_loop(dir.path(), "cat\ndog", one_hot(2, 0));
        let manifest = Manifest::parse("good.png\tcat\nmissing.png\tcat\ngood.png\tcat\n").unwrap();

        let (result, output) = run_to_string(&report, &manifest);
        assert!(matches!(result, Err(EvalError::ImageLoad { .. })));
        assert_eq!(output, "[good.png]: cat\n");
    }

    #[test]
    fn test_skip_policy_continues_past_bad_image() {
        let dir = TempDir::new().unwrap();
        write_solid(dir.path(), "good.png");
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();
        let report = report_loop(dir.path(), "cat\ndog", one_hot(2, 0))
            .with_failure_policy(FailurePolicy::Skip);
        let manifest =
            Manifest::parse("good.png\tcat\nbroken.png\tcat\ngood.png\tdog\n").unwrap();

        let (result, output) = run_to_string(&report, &manifest);
        let summary = result.unwrap();

        assert_eq!(output, "[good.png]: cat\n[good.png]: cat ***WRONG***\n");
        assert_eq!(
            summary,
            ReportSummary {
                processed: 2,
                correct: 1,
                wrong: 1,
                failed: 1
            }
        );
        assert_eq!(summary.accuracy(), Some(0.5));
    }

    #[test]
    fn test_empty_manifest_prints_nothing() {
        let dir = TempDir::new().unwrap();
        let report = report_loop(dir.path(), "cat", vec![1.0]);
        let (result, output) = run_to_string(&report, &Manifest::default());
        assert!(output.is_empty());
        assert_eq!(result.unwrap().accuracy(), None);
    }
}
