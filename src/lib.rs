//! # Inception Eval
//!
//! Batch scoring of labelled images against a pretrained Inception
//! classification graph, using ONNX Runtime.
//!
//! A run reads a tab-separated manifest of `<image path>\t<expected label>`
//! records, preprocesses each image to the graph's fixed input contract,
//! scores it, and prints one line per image:
//!
//! ```text
//! [broccoli.jpg]: broccoli
//! [canoe.jpg]: paddle ***WRONG***
//! ```
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants, and ONNX Runtime hosting
//! * [`dataset`] - Manifest and label table parsing
//! * [`processors`] - Resize and pixel extraction steps
//! * [`pipeline`] - The preprocessing pipeline and its builder
//! * [`predictor`] - Scoring records and resolving labels
//! * [`report`] - The reporting loop
//! * [`runner`] - End-to-end orchestration
//! * [`utils`] - Image loading and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inception_eval::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EvalConfig::new()
//!     .manifest_path("images/tags.tsv")
//!     .images_dir("images")
//!     .graph_path("models/tensorflow_inception_graph.onnx")
//!     .labels_path("models/imagenet_comp_graph_label_strings.txt");
//!
//! let summary = run(config, &mut std::io::stdout().lock())?;
//! println!("{} of {} correct", summary.correct, summary.processed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom graphs
//!
//! Anything implementing [`core::traits::ScoringGraph`] can stand in for the
//! ONNX Runtime session, which is how the reporting loop is tested.

pub mod core;
pub mod dataset;
pub mod pipeline;
pub mod predictor;
pub mod processors;
pub mod report;
pub mod runner;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use inception_eval::prelude::*;
/// ```
///
/// Covers running an evaluation end to end. For custom graphs or pipelines,
/// import from `inception_eval::core::traits`, `inception_eval::pipeline` and
/// `inception_eval::predictor` directly.
pub mod prelude {
    // Configuration
    pub use crate::core::{EvalConfig, FailurePolicy, OrtSessionConfig};

    // Error Handling
    pub use crate::core::{EvalError, EvalResult};

    // Running
    pub use crate::report::{Prediction, ReportSummary};
    pub use crate::runner::run;

    // Image Utility
    pub use crate::utils::load_image;
}
