//! Builder for the preprocessing pipeline.

use super::ImagePipeline;
use crate::core::constants::{INCEPTION_INPUT_HEIGHT, INCEPTION_INPUT_WIDTH};
use crate::core::errors::EvalResult;
use crate::processors::{ExtractPixels, Resize, ResizeMode};
use std::path::PathBuf;
use tracing::info;

/// Assembles an [`ImagePipeline`].
///
/// The defaults are the Inception contract: 224x224, centered crop,
/// interleaved RGB with offset 117.
#[derive(Debug, Clone)]
pub struct ImagePipelineBuilder {
    images_dir: PathBuf,
    input_size: (u32, u32),
    resize_mode: ResizeMode,
    extract: ExtractPixels,
}

impl ImagePipelineBuilder {
    /// Creates a builder with the Inception defaults and the current directory
    /// as images directory.
    pub fn new() -> Self {
        Self {
            images_dir: PathBuf::from("."),
            input_size: (INCEPTION_INPUT_WIDTH, INCEPTION_INPUT_HEIGHT),
            resize_mode: ResizeMode::default(),
            extract: ExtractPixels::for_inception(),
        }
    }

    /// Sets the directory image paths are resolved against.
    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Sets the output size as (width, height).
    ///
    /// Only useful for graphs other than Inception; the default is the
    /// Inception input size.
    pub fn input_size(mut self, size: (u32, u32)) -> Self {
        self.input_size = size;
        self
    }

    /// Sets how images are brought to the output size.
    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.resize_mode = mode;
        self
    }

    /// Sets the pixel extraction step.
    pub fn extract_pixels(mut self, extract: ExtractPixels) -> Self {
        self.extract = extract;
        self
    }

    /// Validates the settings and builds the pipeline.
    pub fn build(self) -> EvalResult<ImagePipeline> {
        info!(
            images_dir = %self.images_dir.display(),
            width = self.input_size.0,
            height = self.input_size.1,
            resize_mode = ?self.resize_mode,
            "building preprocessing pipeline"
        );

        let resize = Resize::new(self.input_size.0, self.input_size.1, self.resize_mode)?;
        let extract =
            ExtractPixels::new(self.extract.offset, self.extract.scale, self.extract.order)?;

        let pipeline = ImagePipeline {
            images_dir: self.images_dir,
            resize,
            extract,
        };
        info!(shape = ?pipeline.output_shape(), "pipeline ready");
        Ok(pipeline)
    }
}

impl Default for ImagePipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::ChannelOrder;

    #[test]
    fn test_defaults_match_inception() {
        let pipeline = ImagePipelineBuilder::new().build().unwrap();
        assert_eq!(pipeline.output_shape(), [1, 224, 224, 3]);
        assert_eq!(pipeline.images_dir(), std::path::Path::new("."));
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(ImagePipelineBuilder::new().input_size((0, 224)).build().is_err());
    }

    #[test]
    fn test_invalid_extraction_is_rejected() {
        let bad = ExtractPixels {
            offset: 0.0,
            scale: -1.0,
            order: ChannelOrder::HWC,
        };
        assert!(ImagePipelineBuilder::new().extract_pixels(bad).build().is_err());
    }

    #[test]
    fn test_custom_size_and_order() {
        let pipeline = ImagePipelineBuilder::new()
            .input_size((160, 80))
            .resize_mode(ResizeMode::Fill)
            .extract_pixels(ExtractPixels::new(0.0, 1.0 / 255.0, ChannelOrder::CHW).unwrap())
            .build()
            .unwrap();
        assert_eq!(pipeline.output_shape(), [1, 3, 80, 160]);
    }

    #[test]
    fn test_resolve_joins_images_dir() {
        let pipeline = ImagePipelineBuilder::new()
            .images_dir("images")
            .build()
            .unwrap();
        assert_eq!(
            pipeline.resolve("broccoli.jpg"),
            PathBuf::from("images/broccoli.jpg")
        );
    }
}
