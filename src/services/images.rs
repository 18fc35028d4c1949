//! Image service
//!
//! Validates uploaded images and renders the fixed-size preview shown next
//! to the caption.

use crate::error::AppError;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::io::Cursor;

/// Maximum accepted upload size (7MB)
pub const MAX_IMAGE_BYTES: usize = 7 * 1024 * 1024;

/// Preview width in pixels
pub const PREVIEW_WIDTH: u32 = 800;

/// Preview height in pixels
pub const PREVIEW_HEIGHT: u32 = 500;

/// Instruction sent with every image when the user gives none
pub const DEFAULT_CAPTION_PROMPT: &str = "Write a short caption for this image";

/// A validated, decoded upload
pub struct UploadedImage {
    bytes: Vec<u8>,
    format: ImageFormat,
    decoded: DynamicImage,
}

impl UploadedImage {
    /// Validate and decode raw upload bytes
    ///
    /// Only PNG and JPEG are accepted, detected from the bytes themselves
    /// rather than the file name.
    ///
    /// # Errors
    /// * `AppError::InvalidImage` if the upload is empty, not PNG/JPEG, or corrupt
    /// * `AppError::PayloadTooLarge` if it exceeds `MAX_IMAGE_BYTES`
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Err(AppError::InvalidImage("Uploaded image is empty".to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "Image is {} bytes, limit is {} bytes",
                bytes.len(),
                MAX_IMAGE_BYTES
            )));
        }

        let format = match image::guess_format(&bytes) {
            Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => format,
            Ok(other) => {
                return Err(AppError::InvalidImage(format!(
                    "Unsupported image type {:?}, expected jpg, jpeg or png",
                    other
                )))
            }
            Err(_) => {
                return Err(AppError::InvalidImage(
                    "Unrecognised image type, expected jpg, jpeg or png".to_string(),
                ))
            }
        };

        let decoded = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| AppError::InvalidImage(format!("Failed to decode image: {}", e)))?;

        tracing::debug!(
            format = ?format,
            width = decoded.width(),
            height = decoded.height(),
            bytes = bytes.len(),
            "Decoded uploaded image"
        );

        Ok(Self {
            bytes,
            format,
            decoded,
        })
    }

    /// Original bytes, as sent to the model
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type of the original bytes
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Original dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.decoded.width(), self.decoded.height())
    }

    /// The preview, resized to exactly 800x500
    pub fn preview(&self) -> DynamicImage {
        self.decoded
            .resize_exact(PREVIEW_WIDTH, PREVIEW_HEIGHT, FilterType::CatmullRom)
    }

    /// The preview encoded as a PNG `data:` URL for direct use in `<img src>`
    pub fn preview_data_url(&self) -> Result<String, AppError> {
        let mut png = Vec::new();
        self.preview()
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode preview: {}", e)))?;
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(&png)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn encode(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut out), format)
            .unwrap();
        out
    }

    #[test]
    fn test_png_accepted() {
        let image = UploadedImage::from_bytes(encode(ImageFormat::Png, 40, 20)).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.dimensions(), (40, 20));
    }

    #[test]
    fn test_jpeg_accepted() {
        let image = UploadedImage::from_bytes(encode(ImageFormat::Jpeg, 16, 16)).unwrap();
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_preview_is_fixed_size() {
        let image = UploadedImage::from_bytes(encode(ImageFormat::Png, 40, 20)).unwrap();
        let preview = image.preview();
        assert_eq!((preview.width(), preview.height()), (800, 500));

        let url = image.preview_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec();
        let err = UploadedImage::from_bytes(gif).err().unwrap();
        assert!(matches!(err, AppError::InvalidImage(_)));
        assert!(err.to_string().contains("jpg, jpeg or png"));
    }

    #[test]
    fn test_garbage_and_empty_rejected() {
        assert!(matches!(
            UploadedImage::from_bytes(b"definitely not an image".to_vec()),
            Err(AppError::InvalidImage(_))
        ));
        assert!(matches!(
            UploadedImage::from_bytes(Vec::new()),
            Err(AppError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_too_large_rejected() {
        let mut bytes = encode(ImageFormat::Png, 4, 4);
        bytes.resize(MAX_IMAGE_BYTES + 1, 0);
        assert!(matches!(
            UploadedImage::from_bytes(bytes),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_truncated_png_rejected() {
        let mut bytes = encode(ImageFormat::Png, 40, 20);
        bytes.truncate(30);
        assert!(matches!(
            UploadedImage::from_bytes(bytes),
            Err(AppError::InvalidImage(_))
        ));
    }
}
