//! Image decoding, PNG encoding and data URL packaging for the adapters

use crate::io::configuration::DATA_URL_PREFIX;
use crate::io::error::{LandValueError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbImage};
use ndarray::Array2;
use std::io::Cursor;
use std::path::Path;

/// Decode an in-memory image of any supported format into 8-bit RGB
///
/// # Errors
///
/// Returns `ImageDecode` if the bytes are not a decodable image
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| LandValueError::ImageDecode { source: e })?;
    Ok(decoded.to_rgb8())
}

/// Encode an RGB image as PNG bytes
///
/// # Errors
///
/// Returns `ImageEncode` if the PNG encoder fails
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| LandValueError::ImageEncode { source: e })?;
    Ok(buffer.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL
pub fn to_data_url(png_bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(png_bytes);
    let mut url = String::with_capacity(DATA_URL_PREFIX.len() + encoded.len());
    url.push_str(DATA_URL_PREFIX);
    url.push_str(&encoded);
    url
}

/// Encode an RGB image straight into a PNG data URL
///
/// # Errors
///
/// Returns `ImageEncode` if the PNG encoder fails
pub fn encode_data_url(image: &RgbImage) -> Result<String> {
    encode_png(image).map(|png| to_data_url(&png))
}

/// Render a scalar field as an 8-bit grayscale image
///
/// Values are scaled by `255 / max_value` and clamped, so a [0,1] field uses
/// `max_value = 1.0` and a score field uses `max_value = 255.0`.
pub fn field_to_gray(field: &Array2<f32>, max_value: f32) -> GrayImage {
    let (rows, cols) = field.dim();
    let scale = if max_value > 0.0 {
        255.0 / max_value
    } else {
        0.0
    };

    let mut image = GrayImage::new(cols as u32, rows as u32);
    for ((row, col), &value) in field.indexed_iter() {
        let level = (value * scale).clamp(0.0, 255.0) as u8;
        image.put_pixel(col as u32, row as u32, Luma([level]));
    }
    image
}

/// Save an image to disk as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to `path`
pub fn save_png(image: impl Into<DynamicImage>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LandValueError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let dynamic: DynamicImage = image.into();
    dynamic
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| LandValueError::ImageEncode { source: e })
}
