use super::*;
use crate::core::config::{OrtGraphOptimizationLevel, OrtSessionConfig};
use ort::logging::LogLevel;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use std::path::Path;
use tracing::debug;

impl OrtInfer {
    /// Loads the graph at `model_path` with default ONNX Runtime settings.
    pub fn new(
        model_path: impl AsRef<Path>,
        input_name: &str,
        output_name: &str,
    ) -> Result<Self, EvalError> {
        Self::from_config(None, model_path, input_name, output_name)
    }

    /// Loads the graph at `model_path`, applying the optional session configuration.
    ///
    /// Fails with [`EvalError::ModelLoad`] if the file is missing or not a
    /// loadable model, or if the model has no tensor with one of the given names.
    pub fn from_config(
        config: Option<&OrtSessionConfig>,
        model_path: impl AsRef<Path>,
        input_name: &str,
        output_name: &str,
    ) -> Result<Self, EvalError> {
        let path = model_path.as_ref();
        let builder = Session::builder()?;
        let builder = match config {
            Some(cfg) => Self::apply_ort_config(builder, cfg)?,
            // Keep ORT quiet unless it has something serious to say
            None => builder.with_log_level(LogLevel::Error)?,
        };
        let session = builder.commit_from_file(path).map_err(|e| {
            EvalError::model_load_error(
                path,
                "failed to create ONNX session",
                Some("verify model file exists and is a valid ONNX graph"),
                Some(e),
            )
        })?;

        if !session.inputs.iter().any(|input| input.name == input_name) {
            return Err(EvalError::model_load_error(
                path,
                &format!("model has no input tensor named '{input_name}'"),
                None,
                None::<crate::core::errors::SimpleError>,
            ));
        }
        if !session.outputs.iter().any(|output| output.name == output_name) {
            return Err(EvalError::model_load_error(
                path,
                &format!("model has no output tensor named '{output_name}'"),
                None,
                None::<crate::core::errors::SimpleError>,
            ));
        }

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();
        debug!(model = %model_name, input_name, output_name, "ONNX session ready");

        Ok(OrtInfer {
            session: Mutex::new(session),
            input_name: input_name.to_string(),
            output_name: output_name.to_string(),
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    fn apply_ort_config(
        mut builder: SessionBuilder,
        cfg: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        builder = builder.with_log_level(LogLevel::Error)?;
        if let Some(intra) = cfg.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = cfg.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(level) = cfg.optimization_level {
            let mapped = match level {
                OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
                OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
            };
            builder = builder.with_optimization_level(mapped)?;
        }
        Ok(builder)
    }
}
