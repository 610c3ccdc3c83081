//! Fixed-size image resizing.

use crate::core::errors::{EvalError, EvalResult, SimpleError};
use crate::processors::types::ResizeMode;
use image::{RgbImage, imageops::FilterType};

/// Resizes images to an exact target size.
///
/// Filtering is bilinear (`FilterType::Triangle`).
#[derive(Debug, Clone)]
pub struct Resize {
    width: u32,
    height: u32,
    mode: ResizeMode,
    filter: FilterType,
}

impl Resize {
    /// Creates a resizer for the given target size and mode.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ConfigError` if either dimension is zero.
    pub fn new(width: u32, height: u32, mode: ResizeMode) -> EvalResult<Self> {
        if width == 0 || height == 0 {
            return Err(EvalError::config_error(format!(
                "resize target must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            mode,
            filter: FilterType::Triangle,
        })
    }

    /// Target width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Target height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The configured resize mode.
    pub fn mode(&self) -> ResizeMode {
        self.mode
    }

    /// Resizes `img` to exactly `width x height`.
    pub fn apply(&self, img: &RgbImage) -> EvalResult<RgbImage> {
        let (src_w, src_h) = img.dimensions();
        if src_w == 0 || src_h == 0 {
            return Err(EvalError::resize_error(
                &format!("cannot resize a {src_w}x{src_h} image"),
                SimpleError::new("image has no pixels"),
            ));
        }

        match self.mode {
            ResizeMode::Fill => Ok(image::imageops::resize(
                img,
                self.width,
                self.height,
                self.filter,
            )),
            ResizeMode::IsoCrop => {
                let (x, y, w, h) = self.center_crop_region(src_w, src_h);
                let cropped = image::imageops::crop_imm(img, x, y, w, h).to_image();
                Ok(image::imageops::resize(
                    &cropped,
                    self.width,
                    self.height,
                    self.filter,
                ))
            }
        }
    }

    /// Largest centered region of a `src_w x src_h` image with the target aspect ratio.
    fn center_crop_region(&self, src_w: u32, src_h: u32) -> (u32, u32, u32, u32) {
        let scale = f64::max(
            self.width as f64 / src_w as f64,
            self.height as f64 / src_h as f64,
        );
        let crop_w = ((self.width as f64 / scale).round() as u32).clamp(1, src_w);
        let crop_h = ((self.height as f64 / scale).round() as u32).clamp(1, src_h);
        let x = (src_w - crop_w) / 2;
        let y = (src_h - crop_h) / 2;
        (x, y, crop_w, crop_h)
    }
}
