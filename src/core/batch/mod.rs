//! Tensor type aliases shared by the pipeline and the inference adapter.

/// A 2-dimensional tensor, `[batch, classes]` for classification scores.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4-dimensional tensor, `[batch, height, width, channels]` for graph input.
pub type Tensor4D = ndarray::Array4<f32>;
