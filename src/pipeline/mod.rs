//! The preprocessing pipeline.
//!
//! An [`ImagePipeline`] runs a fixed sequence of steps over one image:
//!
//! 1. load the file, resolved against the images directory
//! 2. resize to the graph's input size
//! 3. extract offset pixel values in the graph's channel order
//! 4. wrap them in a batch of one
//!
//! Pipelines are assembled and validated by [`ImagePipelineBuilder`] and are
//! immutable once built.

mod builder;

pub use builder::ImagePipelineBuilder;

use crate::core::Tensor4D;
use crate::core::errors::EvalResult;
use crate::processors::{ChannelOrder, ExtractPixels, Resize};
use crate::utils::load_image;
use image::RgbImage;
use std::path::{Path, PathBuf};

/// A built preprocessing pipeline.
#[derive(Debug, Clone)]
pub struct ImagePipeline {
    images_dir: PathBuf,
    resize: Resize,
    extract: ExtractPixels,
}

impl ImagePipeline {
    /// Starts building a pipeline.
    pub fn builder() -> ImagePipelineBuilder {
        ImagePipelineBuilder::new()
    }

    /// The directory image paths are resolved against.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Resolves a manifest image path against the images directory.
    pub fn resolve(&self, image_path: &str) -> PathBuf {
        self.images_dir.join(image_path)
    }

    /// Step 1: load and decode the image.
    pub fn load(&self, image_path: &str) -> EvalResult<RgbImage> {
        load_image(&self.resolve(image_path))
    }

    /// Steps 2 to 4 on an already decoded image.
    pub fn transform(&self, img: &RgbImage) -> EvalResult<Tensor4D> {
        let resized = self.resize.apply(img)?;
        self.extract.to_batch(&resized)
    }

    /// Runs every step for the image at `image_path`.
    pub fn run(&self, image_path: &str) -> EvalResult<Tensor4D> {
        let img = self.load(image_path)?;
        self.transform(&img)
    }

    /// The shape of every tensor this pipeline produces.
    pub fn output_shape(&self) -> [usize; 4] {
        let h = self.resize.height() as usize;
        let w = self.resize.width() as usize;
        match self.extract.order {
            ChannelOrder::HWC => [1, h, w, 3],
            ChannelOrder::CHW => [1, 3, h, w],
        }
    }
}
