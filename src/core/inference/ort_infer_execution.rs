use super::*;
use crate::core::errors::SimpleError;
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Returns the name of the input tensor the graph is fed through.
    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    /// Returns the name of the output tensor scores are read from.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    fn run_inference_with_processor<T>(
        &self,
        x: &Tensor4D,
        processor: impl FnOnce(&[i64], &[f32]) -> Result<T, EvalError>,
    ) -> Result<T, EvalError> {
        let input_shape = x.shape().to_vec();

        let input_tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
            EvalError::inference_error(
                &self.model_name,
                &format!("failed to convert input tensor with shape {input_shape:?}"),
                e,
            )
        })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            EvalError::inference_error(
                &self.model_name,
                "failed to acquire session lock",
                SimpleError::new("session lock poisoned"),
            )
        })?;

        let outputs = session.run(inputs).map_err(|e| {
            EvalError::inference_error(
                &self.model_name,
                &format!(
                    "ONNX Runtime inference failed with input '{}' -> output '{}'",
                    self.input_name, self.output_name
                ),
                e,
            )
        })?;

        let (output_shape, output_data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                EvalError::inference_error(
                    &self.model_name,
                    &format!("failed to extract output tensor '{}' as f32", self.output_name),
                    e,
                )
            })?;

        processor(output_shape, output_data)
    }

    /// Runs the graph and returns the named output as `[batch, classes]`.
    pub fn infer_2d(&self, x: &Tensor4D) -> Result<Tensor2D, EvalError> {
        let batch_size = x.shape()[0];
        self.run_inference_with_processor(x, |output_shape, output_data| {
            if output_shape.len() != 2 {
                return Err(EvalError::inference_error(
                    &self.model_name,
                    &format!(
                        "expected 2D output tensor '{}', got {}D with shape {:?}",
                        self.output_name,
                        output_shape.len(),
                        output_shape
                    ),
                    SimpleError::new("invalid output tensor dimensions"),
                ));
            }

            let num_classes = output_shape[1] as usize;
            let expected_len = batch_size * num_classes;
            if output_data.len() != expected_len {
                return Err(EvalError::inference_error(
                    &self.model_name,
                    &format!(
                        "output data size mismatch: expected {}, got {}",
                        expected_len,
                        output_data.len()
                    ),
                    SimpleError::new("output tensor data size mismatch"),
                ));
            }

            let array_view = ArrayView2::from_shape((batch_size, num_classes), output_data)
                .map_err(EvalError::Tensor)?;
            Ok(array_view.to_owned())
        })
    }
}
