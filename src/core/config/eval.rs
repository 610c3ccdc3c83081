//! Configuration for an evaluation run.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::OrtSessionConfig;
use crate::core::constants::{
    DEFAULT_GRAPH_PATH, DEFAULT_IMAGES_DIR, DEFAULT_LABELS_PATH, DEFAULT_MANIFEST_PATH,
};
use crate::core::errors::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What the reporting loop does when a single record fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// The first failing record ends the run.
    #[default]
    Abort,
    /// Failing records are logged and counted; the run continues.
    Skip,
}

/// Paths and options for one evaluation run.
///
/// Every field has a default matching the conventional layout
/// (`images/tags.tsv`, `images/`, `models/...`), so a JSON file only needs to
/// name what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Tab-separated manifest of `<image path>\t<expected label>` lines.
    pub manifest_path: PathBuf,
    /// Directory the manifest's image paths are relative to.
    pub images_dir: PathBuf,
    /// ONNX export of the frozen classification graph.
    pub graph_path: PathBuf,
    /// Label list, one class name per line in graph output order.
    pub labels_path: PathBuf,
    /// Behavior when a record fails to load or score.
    pub failure_policy: FailurePolicy,
    /// Optional ONNX Runtime session tuning.
    pub ort_session: Option<OrtSessionConfig>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            graph_path: PathBuf::from(DEFAULT_GRAPH_PATH),
            labels_path: PathBuf::from(DEFAULT_LABELS_PATH),
            failure_policy: FailurePolicy::default(),
            ort_session: None,
        }
    }
}

impl EvalConfig {
    /// Creates a configuration with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The result is not
    /// validated; call [`ConfigValidator::validate`] before using it.
    pub fn from_json_file(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EvalError::config_error(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            EvalError::config_error(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Sets the manifest path.
    pub fn manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Sets the images directory.
    pub fn images_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.images_dir = path.into();
        self
    }

    /// Sets the graph path.
    pub fn graph_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.graph_path = path.into();
        self
    }

    /// Sets the label list path.
    pub fn labels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels_path = path.into();
        self
    }

    /// Sets the failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn ort_session(mut self, config: OrtSessionConfig) -> Self {
        self.ort_session = Some(config);
        self
    }
}

impl ConfigValidator for EvalConfig {
    /// Checks the graph first so a missing model is reported before anything
    /// else is touched. The manifest itself is not checked here; it is read
    /// only after the graph has loaded.
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_model_path(&self.graph_path)?;
        self.validate_file_path(&self.labels_path, "label file")?;
        self.validate_dir_path(&self.images_dir, "images directory")?;

        if let Some(ort) = &self.ort_session {
            if let Some(threads) = ort.intra_threads {
                self.validate_thread_count(threads)?;
            }
            if let Some(threads) = ort.inter_threads {
                self.validate_thread_count(threads)?;
            }
        }

        Ok(())
    }
}
