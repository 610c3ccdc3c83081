//! End-to-end orchestration of an evaluation run.
//!
//! Stages run in a fixed order so that the cheapest and most fundamental
//! failures surface first:
//!
//! 1. validate the configuration
//! 2. load the label table
//! 3. load the graph and check its class count against the labels
//! 4. build the preprocessing pipeline
//! 5. read the manifest
//! 6. run the reporting loop

use crate::core::config::{ConfigValidatorExt, EvalConfig};
use crate::core::constants::{INCEPTION_INPUT_NAME, INCEPTION_OUTPUT_NAME};
use crate::core::errors::EvalResult;
use crate::core::inference::OrtInfer;
use crate::core::traits::ScoringGraph;
use crate::dataset::{LabelTable, Manifest};
use crate::pipeline::ImagePipeline;
use crate::predictor::{LabelResolver, PredictionEngine};
use crate::report::{ReportLoop, ReportSummary};
use std::io::Write;
use tracing::info;

/// Loads everything a run needs except the manifest.
///
/// The graph is loaded before any image or manifest is touched, so a missing
/// or broken graph ends the run with nothing printed.
pub fn build_report_loop(config: EvalConfig) -> EvalResult<ReportLoop<OrtInfer>> {
    let config = config.validate_and_wrap_eval_error()?;

    let labels = LabelTable::from_path(&config.labels_path)?;
    info!(
        path = %config.labels_path.display(),
        classes = labels.len(),
        "loaded label table"
    );

    let graph = OrtInfer::from_config(
        config.ort_session.as_ref(),
        &config.graph_path,
        INCEPTION_INPUT_NAME,
        INCEPTION_OUTPUT_NAME,
    )?;
    info!(
        model = graph.model_name(),
        output_shape = ?graph.output_shape(),
        "loaded scoring graph"
    );

    assemble_report_loop(&config, labels, graph)
}

/// Wires an already loaded graph and label table into a report loop.
///
/// Fails with `EvalError::ConfigError` when the graph declares a class count
/// that differs from the number of labels.
pub fn assemble_report_loop<G: ScoringGraph>(
    config: &EvalConfig,
    labels: LabelTable,
    graph: G,
) -> EvalResult<ReportLoop<G>> {
    if let Some(classes) = graph.declared_classes() {
        labels.ensure_matches(classes)?;
    }

    let pipeline = ImagePipeline::builder()
        .images_dir(&config.images_dir)
        .build()?;

    let engine = PredictionEngine::new(pipeline, graph);
    Ok(ReportLoop::new(engine, LabelResolver::new(labels))
        .with_failure_policy(config.failure_policy))
}

/// Runs a full evaluation, writing one report line per record to `out`.
pub fn run<W: Write>(config: EvalConfig, out: &mut W) -> EvalResult<ReportSummary> {
    let manifest_path = config.manifest_path.clone();
    let report = build_report_loop(config)?;

    let manifest = Manifest::from_path(&manifest_path)?;
    info!(
        path = %manifest_path.display(),
        records = manifest.len(),
        "loaded manifest"
    );

    let summary = report.run(&manifest, out)?;
    match summary.accuracy() {
        Some(accuracy) => info!(
            processed = summary.processed,
            correct = summary.correct,
            wrong = summary.wrong,
            failed = summary.failed,
            "accuracy: {:.2}%",
            accuracy * 100.0
        ),
        None => info!(failed = summary.failed, "no records were scored"),
    }

    Ok(summary)
}
