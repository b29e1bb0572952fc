//! Grayscale thumbnail generation with JPEG output.

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ImageReader};
use std::io::Cursor;
use tracing::debug;

use crate::domain::{error::TransformError, ports::ImageTransformer};

pub const THUMBNAIL_WIDTH: u32 = 200;
pub const THUMBNAIL_HEIGHT: u32 = 200;
const JPEG_QUALITY: u8 = 75;

/// Converts images to fixed-size grayscale JPEG thumbnails.
///
/// Both dimensions are forced, so the source aspect ratio is not kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct GrayscaleThumbnailer;

impl GrayscaleThumbnailer {
    pub fn new() -> Self {
        Self
    }
}

impl ImageTransformer for GrayscaleThumbnailer {
    fn transform(&self, source: &[u8]) -> Result<Vec<u8>, TransformError> {
        let decoded = ImageReader::new(Cursor::new(source))
            .with_guessed_format()
            .map_err(|e| TransformError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| TransformError::Decode(e.to_string()))?;
        debug!("Decoded {}x{} source image", decoded.width(), decoded.height());

        let gray = decoded.to_luma8();
        drop(decoded);

        let thumbnail = image::imageops::resize(&gray, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::CatmullRom);

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
            .encode_image(&thumbnail)
            .map_err(|e| TransformError::Encode(e.to_string()))?;

        Ok(buffer)
    }

    fn content_type(&self) -> &'static str {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, DynamicImage, ImageFormat, Rgb, RgbImage};

    fn jpeg_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 3) as u8, (y * 5) as u8, 128]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_thumbnail_is_200x200_grayscale_jpeg() {
        let source = jpeg_fixture(64, 48);

        let output = GrayscaleThumbnailer::new().transform(&source).unwrap();

        let decoded = image::load_from_memory_with_format(&output, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.width(), THUMBNAIL_WIDTH);
        assert_eq!(decoded.height(), THUMBNAIL_HEIGHT);
        assert_eq!(decoded.color(), ColorType::L8);
    }

    #[test]
    fn test_aspect_ratio_is_not_preserved() {
        let source = jpeg_fixture(400, 100);

        let output = GrayscaleThumbnailer::new().transform(&source).unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));
    }

    #[test]
    fn test_accepts_png_bytes() {
        let img = DynamicImage::new_rgba8(10, 10);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();

        let output = GrayscaleThumbnailer::new().transform(buffer.get_ref()).unwrap();

        assert_eq!(&output[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_corrupt_bytes_are_decode_error() {
        let result = GrayscaleThumbnailer::new().transform(b"definitely not a jpeg");
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_truncated_jpeg_is_decode_error() {
        let source = jpeg_fixture(32, 32);
        let result = GrayscaleThumbnailer::new().transform(&source[..20]);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_empty_input_is_decode_error() {
        let result = GrayscaleThumbnailer::new().transform(&[]);
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }
}
