//! Pixel extraction into graph input tensors.
//!
//! Each channel value `v` becomes `(v - offset) * scale`. Values are emitted
//! interleaved (HWC) or planar (CHW) and wrapped in a leading batch
//! dimension of size 1.

use crate::core::Tensor4D;
use crate::core::constants::{INCEPTION_CHANNELS, INCEPTION_PIXEL_OFFSET, INCEPTION_PIXEL_SCALE};
use crate::core::errors::{EvalError, EvalResult};
use crate::processors::types::ChannelOrder;
use image::RgbImage;

/// Converts RGB images into float tensors.
#[derive(Debug, Clone)]
pub struct ExtractPixels {
    /// Value subtracted from every channel value
    pub offset: f32,
    /// Factor applied after the offset
    pub scale: f32,
    /// Channel ordering (CHW or HWC)
    pub order: ChannelOrder,
}

impl ExtractPixels {
    /// Creates a new extractor.
    ///
    /// # Errors
    ///
    /// Returns `EvalError::ConfigError` if the offset is not finite or the
    /// scale is not a finite positive number.
    pub fn new(offset: f32, scale: f32, order: ChannelOrder) -> EvalResult<Self> {
        if !offset.is_finite() {
            return Err(EvalError::config_error(format!(
                "pixel offset must be finite, got {offset}"
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EvalError::config_error(format!(
                "pixel scale must be greater than 0, got {scale}"
            )));
        }
        Ok(Self {
            offset,
            scale,
            order,
        })
    }

    /// The extraction the Inception graph was trained with: interleaved RGB,
    /// offset 117, scale 1.
    pub fn for_inception() -> Self {
        Self {
            offset: INCEPTION_PIXEL_OFFSET,
            scale: INCEPTION_PIXEL_SCALE,
            order: ChannelOrder::HWC,
        }
    }

    #[inline]
    fn convert(&self, value: u8) -> f32 {
        (value as f32 - self.offset) * self.scale
    }

    /// Extracts the pixel values of `img` in the configured order.
    pub fn extract(&self, img: &RgbImage) -> Vec<f32> {
        let (width, height) = img.dimensions();
        let plane = (width * height) as usize;
        let mut values = vec![0.0f32; plane * INCEPTION_CHANNELS];

        match self.order {
            ChannelOrder::HWC => {
                for (dst, &src) in values.iter_mut().zip(img.as_raw().iter()) {
                    *dst = self.convert(src);
                }
            }
            ChannelOrder::CHW => {
                for (idx, pixel) in img.pixels().enumerate() {
                    for c in 0..INCEPTION_CHANNELS {
                        values[c * plane + idx] = self.convert(pixel[c]);
                    }
                }
            }
        }

        values
    }

    /// Extracts `img` into a single-image batch tensor.
    ///
    /// The shape is `[1, height, width, 3]` for HWC and `[1, 3, height, width]` for CHW.
    pub fn to_batch(&self, img: &RgbImage) -> EvalResult<Tensor4D> {
        let (width, height) = img.dimensions();
        let (h, w) = (height as usize, width as usize);
        let values = self.extract(img);
        let shape = match self.order {
            ChannelOrder::HWC => (1, h, w, INCEPTION_CHANNELS),
            ChannelOrder::CHW => (1, INCEPTION_CHANNELS, h, w),
        };
        Tensor4D::from_shape_vec(shape, values).map_err(|e| {
            EvalError::pixel_extraction(
                &format!("failed to shape {w}x{h} image into {shape:?}"),
                e,
            )
        })
    }
}

impl Default for ExtractPixels {
    fn default() -> Self {
        Self::for_inception()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_new_validates_parameters() {
        assert!(ExtractPixels::new(117.0, 1.0, ChannelOrder::HWC).is_ok());
        assert!(ExtractPixels::new(f32::NAN, 1.0, ChannelOrder::HWC).is_err());
        assert!(ExtractPixels::new(0.0, 0.0, ChannelOrder::HWC).is_err());
        assert!(ExtractPixels::new(0.0, f32::INFINITY, ChannelOrder::CHW).is_err());
    }

    #[test]
    fn test_offset_is_subtracted_from_every_channel() {
        let extractor = ExtractPixels::for_inception();

        let neutral = RgbImage::from_pixel(4, 4, Rgb([117, 117, 117]));
        assert!(extractor.extract(&neutral).iter().all(|&v| v == 0.0));

        let extremes = RgbImage::from_pixel(1, 1, Rgb([255, 0, 117]));
        assert_eq!(extractor.extract(&extremes), vec![138.0, -117.0, 0.0]);
    }

    fn two_pixels() -> RgbImage {
        RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([1, 2, 3])
            } else {
                Rgb([4, 5, 6])
            }
        })
    }

    #[test]
    fn test_hwc_is_interleaved() {
        let extractor = ExtractPixels::new(0.0, 1.0, ChannelOrder::HWC).unwrap();
        let img = two_pixels();
        assert_eq!(extractor.extract(&img), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_chw_is_planar() {
        let extractor = ExtractPixels::new(0.0, 1.0, ChannelOrder::CHW).unwrap();
        let img = two_pixels();
        assert_eq!(extractor.extract(&img), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_scale_applies_after_offset() {
        let extractor = ExtractPixels::new(100.0, 0.5, ChannelOrder::HWC).unwrap();
        let img = RgbImage::from_pixel(1, 1, Rgb([200, 100, 0]));
        assert_eq!(extractor.extract(&img), vec![50.0, 0.0, -50.0]);
    }

    #[test]
    fn test_to_batch_shapes() {
        let img = RgbImage::from_pixel(224, 224, Rgb([0, 0, 0]));

        let hwc = ExtractPixels::for_inception().to_batch(&img).unwrap();
        assert_eq!(hwc.shape(), &[1, 224, 224, 3]);

        let chw = ExtractPixels::new(0.0, 1.0, ChannelOrder::CHW)
            .unwrap()
            .to_batch(&img)
            .unwrap();
        assert_eq!(chw.shape(), &[1, 3, 224, 224]);
    }

    #[test]
    fn test_to_batch_preserves_pixel_position() {
        let extractor = ExtractPixels::new(0.0, 1.0, ChannelOrder::HWC).unwrap();
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        let batch = extractor.to_batch(&img).unwrap();
        assert_eq!(batch[[0, 1, 2, 0]], 2.0);
        assert_eq!(batch[[0, 1, 2, 1]], 1.0);
        assert_eq!(batch[[0, 0, 0, 2]], 9.0);
    }
}
