//! Image loading helpers.

use crate::core::errors::{EvalError, EvalResult};
use image::{DynamicImage, ImageError, ImageReader, RgbImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads an image from a file path and converts it to RgbImage.
///
/// The `image` crate picks the decoder from the file extension, which fails
/// when JPEG bytes are stored in a `.png` file (or vice versa). When that
/// happens the load is retried once with format sniffing so the content
/// decides the decoder.
///
/// # Errors
///
/// Returns `EvalError::ImageLoad` if the file is missing or not decodable.
pub fn load_image(path: &Path) -> EvalResult<RgbImage> {
    load_dynamic_image(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| EvalError::image_load(path, e))
}

fn load_dynamic_image(path: &Path) -> Result<DynamicImage, ImageError> {
    match image::open(path) {
        Ok(img) => Ok(img),
        Err(err) if should_retry(&err) => {
            tracing::warn!(
                "Standard decode failed for {} ({err}). Retrying with format sniffing.",
                path.display()
            );
            decode_with_guessed_format(path)
        }
        Err(err) => Err(err),
    }
}

fn should_retry(err: &ImageError) -> bool {
    matches!(err, ImageError::Decoding(_) | ImageError::Unsupported(_))
}

fn decode_with_guessed_format(path: &Path) -> Result<DynamicImage, ImageError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let reader = ImageReader::new(reader).with_guessed_format()?;
    reader.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use tempfile::TempDir;

    #[test]
    fn test_load_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(8, 6, Rgb([255, 0, 0])).save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_load_with_mismatched_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("actually_png.jpg");
        RgbImage::from_pixel(4, 4, Rgb([0, 255, 0]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.get_pixel(3, 3).0, [0, 255, 0]);
    }

    #[test]
    fn test_missing_file_is_image_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.jpg");
        match load_image(&path) {
            Err(EvalError::ImageLoad { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ImageLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_content_is_image_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"this is not an image").unwrap();
        assert!(matches!(
            load_image(&path),
            Err(EvalError::ImageLoad { .. })
        ));
    }
}
