//! Optical character recognition.
//!
//! [`TesseractEngine`] drives the `tesseract` command-line tool: the page
//! image is written to a temporary PNG and tesseract prints the recognised
//! text to stdout. Any engine can be plugged in through
//! [`RecognitionEngine`]; the OCR fallback only sees the trait.

use crate::error::OcrError;
use crate::pipeline::encode;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Converts a raster image into text.
pub trait RecognitionEngine {
    /// Recognise `image` using the tesseract-style `language` hint
    /// (e.g. "eng", "eng+fra"). The returned text is untrimmed.
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError>;
}

/// Recognition through the `tesseract` CLI.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: PathBuf,
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new(None::<PathBuf>)
    }
}

impl TesseractEngine {
    /// `command` is the tesseract executable; `None` looks it up on `PATH`.
    pub fn new(command: Option<impl Into<PathBuf>>) -> Self {
        Self {
            command: command
                .map(Into::into)
                .unwrap_or_else(|| PathBuf::from("tesseract")),
        }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

impl RecognitionEngine for TesseractEngine {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String, OcrError> {
        let png = encode::write_png_temp(image)?;

        debug!(
            "Running {} on {} (lang={})",
            self.command.display(),
            png.path().display(),
            language
        );
        let output = Command::new(&self.command)
            .arg(png.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|source| OcrError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Exit {
                command: self.command.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        // Tesseract terminates each page with a form feed.
        Ok(String::from_utf8_lossy(&output.stdout).replace('\x0c', ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn blank_page() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255])))
    }

    #[test]
    fn default_command_is_path_lookup() {
        assert_eq!(TesseractEngine::default().command(), Path::new("tesseract"));
    }

    #[test]
    fn explicit_command_is_kept() {
        let engine = TesseractEngine::new(Some("/opt/tess/bin/tesseract"));
        assert_eq!(engine.command(), Path::new("/opt/tess/bin/tesseract"));
    }

    #[test]
    fn missing_executable_is_spawn_error() {
        let engine = TesseractEngine::new(Some("/definitely/not/tesseract"));
        let err = engine.recognize(&blank_page(), "eng").unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }), "got: {err:?}");
    }
}
