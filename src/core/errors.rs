//! Error types for the evaluation pipeline.
//!
//! This module defines the errors that can occur while evaluating a labeled
//! image set: manifest format errors, image loading errors, preprocessing and
//! inference errors, label table mismatches, and configuration errors. It also
//! provides helper constructors for creating these errors with context.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Enum representing the stages of the preprocessing pipeline.
///
/// This enum is used to identify which stage an error occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred during image resizing.
    Resize,
    /// Error occurred during pixel extraction.
    PixelExtraction,
    /// Error occurred while building or reshaping a tensor.
    TensorOperation,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::PixelExtraction => write!(f, "pixel extraction"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
        }
    }
}

/// Enum representing the errors that can occur during an evaluation run.
#[derive(Error, Debug)]
pub enum EvalError {
    /// A manifest line did not contain exactly two tab-separated fields.
    #[error("manifest line {line}: {message}")]
    ManifestFormat {
        /// 1-based line number in the manifest file.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Error occurred while opening or decoding an image.
    #[error("failed to load image '{}'", path.display())]
    ImageLoad {
        /// The resolved path of the image.
        path: PathBuf,
        /// The underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Error occurred during preprocessing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred while loading the inference graph.
    #[error("failed to load model '{}': {context}", path.display())]
    ModelLoad {
        /// Path of the model file.
        path: PathBuf,
        /// Additional context about the failure.
        context: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error occurred while running the inference graph.
    #[error("inference with model '{model_name}' failed: {context}")]
    Inference {
        /// Name of the model that failed.
        model_name: String,
        /// Additional context about the failure.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The score vector does not line up with the label table.
    #[error("label table has {labels} entries but the graph produced {scores} scores")]
    LabelMismatch {
        /// Number of labels in the label table.
        labels: usize,
        /// Number of scores in the probability vector.
        scores: usize,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// A plain message error used as the source of errors that have no
/// underlying cause of their own.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SimpleError(String);

impl SimpleError {
    /// Creates a new message error.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl EvalError {
    /// Creates a manifest format error for the given 1-based line.
    pub fn manifest_format(line: usize, message: impl Into<String>) -> Self {
        Self::ManifestFormat {
            line,
            message: message.into(),
        }
    }

    /// Creates an image load error for the given path.
    pub fn image_load(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an EvalError for resize operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn resize_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::Resize, context, error)
    }

    /// Creates an EvalError for pixel extraction.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn pixel_extraction(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::PixelExtraction, context, error)
    }

    /// Creates an EvalError for tensor operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::TensorOperation, context, error)
    }

    /// Creates an EvalError for the given processing stage.
    pub fn processing_error(
        kind: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an EvalError for a model that could not be loaded.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the model file.
    /// * `context` - What went wrong.
    /// * `suggestion` - Optional hint appended to the context.
    /// * `error` - Optional underlying error.
    pub fn model_load_error(
        path: impl AsRef<Path>,
        context: &str,
        suggestion: Option<&str>,
        error: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let context = match suggestion {
            Some(hint) => format!("{context} ({hint})"),
            None => context.to_string(),
        };
        Self::ModelLoad {
            path: path.as_ref().to_path_buf(),
            context,
            source: error.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Creates an EvalError for inference operations.
    ///
    /// # Arguments
    ///
    /// * `model_name` - Name of the model.
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an EvalError for invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an EvalError for configuration errors.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Returns true if the error only affects the record being processed.
    ///
    /// These are the errors a skipping run isolates; everything else points
    /// at the configuration or the graph and ends the run.
    pub fn is_record_failure(&self) -> bool {
        matches!(
            self,
            Self::ImageLoad { .. } | Self::Processing { .. } | Self::Inference { .. }
        )
    }
}

impl From<crate::core::config::ConfigError> for EvalError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}
