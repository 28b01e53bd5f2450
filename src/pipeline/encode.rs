//! Image encoding: `DynamicImage` → PNG file on disk for the OCR engine.
//!
//! The tesseract CLI reads its input from a path, so each rendered page is
//! written to a [`tempfile::NamedTempFile`] that is deleted when dropped.
//! PNG is lossless; compression artefacts around glyph edges cost OCR
//! accuracy.

use image::DynamicImage;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;
use tracing::debug;

/// Encode a rasterised page as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;
    debug!("Encoded image → {} bytes PNG", buf.len());
    Ok(buf)
}

/// Write a rasterised page to a temporary `.png` file.
pub fn write_png_temp(img: &DynamicImage) -> Result<NamedTempFile, image::ImageError> {
    let bytes = encode_png(img)?;
    let mut file = tempfile::Builder::new()
        .prefix("pdf2md-ocr-page-")
        .suffix(".png")
        .tempfile()
        .map_err(image::ImageError::IoError)?;
    file.write_all(&bytes).map_err(image::ImageError::IoError)?;
    file.flush().map_err(image::ImageError::IoError)?;
    Ok(file)
}
