//! Page rasterisation for the OCR fallback.
//!
//! Two backends implement [`Rasterizer`]:
//!
//! * [`PdfiumDocument`] renders from the already-loaded pdfium document
//!   (default).
//! * [`PopplerRasterizer`] shells out to Poppler's `pdftoppm`, selected when
//!   a Poppler `bin` directory is configured.
//!
//! Both render a single page per call; the assembler only rasterises pages
//! whose text layer was rejected.

use crate::error::PageError;
use crate::pipeline::source::PdfiumDocument;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Renders one page of a document bound at construction.
pub trait Rasterizer {
    /// Render page `page_num` (1-indexed) at `dpi`.
    ///
    /// `Ok(None)` means the backend ran but produced no image.
    fn rasterize(&self, page_num: usize, dpi: u32) -> Result<Option<DynamicImage>, PageError>;
}

impl Rasterizer for PdfiumDocument<'_> {
    fn rasterize(&self, page_num: usize, dpi: u32) -> Result<Option<DynamicImage>, PageError> {
        let page = self
            .page(page_num)
            .map_err(|detail| PageError::RasterisationFailed {
                page: page_num,
                detail,
            })?;

        // PDF user space is 72 units per inch.
        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(dpi as f32 / 72.0)
            .set_maximum_width(self.max_rendered_pixels as i32)
            .set_maximum_height(self.max_rendered_pixels as i32);

        let bitmap =
            page.render_with_config(&render_config)
                .map_err(|e| PageError::RasterisationFailed {
                    page: page_num,
                    detail: format!("{:?}", e),
                })?;

        let image = bitmap.as_image();
        if image.width() == 0 || image.height() == 0 {
            return Ok(None);
        }
        debug!(
            "Rendered page {} → {}x{} px",
            page_num,
            image.width(),
            image.height()
        );
        Ok(Some(image))
    }
}

/// Rasterises pages with Poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    pdf_path: PathBuf,
    pdftoppm: PathBuf,
}

impl PopplerRasterizer {
    /// `poppler_bin` is the directory holding `pdftoppm`; `None` uses `PATH`.
    pub fn new(pdf_path: impl Into<PathBuf>, poppler_bin: Option<&Path>) -> Self {
        let exe = if cfg!(windows) { "pdftoppm.exe" } else { "pdftoppm" };
        let pdftoppm = match poppler_bin {
            Some(dir) => dir.join(exe),
            None => PathBuf::from(exe),
        };
        Self {
            pdf_path: pdf_path.into(),
            pdftoppm,
        }
    }

    pub fn command(&self) -> &Path {
        &self.pdftoppm
    }
}

impl Rasterizer for PopplerRasterizer {
    fn rasterize(&self, page_num: usize, dpi: u32) -> Result<Option<DynamicImage>, PageError> {
        let fail = |detail: String| PageError::RasterisationFailed {
            page: page_num,
            detail,
        };

        let temp_dir = tempfile::Builder::new()
            .prefix("pdf2md-ocr-")
            .tempdir()
            .map_err(|e| fail(format!("temp dir: {e}")))?;
        let prefix = temp_dir.path().join("page");
        let page_arg = page_num.to_string();

        debug!(
            "Running {} on page {} at {} DPI",
            self.pdftoppm.display(),
            page_num,
            dpi
        );
        let output = Command::new(&self.pdftoppm)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(&page_arg)
            .arg("-l")
            .arg(&page_arg)
            .arg("-singlefile")
            .arg(&self.pdf_path)
            .arg(&prefix)
            .output()
            .map_err(|e| fail(format!("failed to run {}: {e}", self.pdftoppm.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(format!("pdftoppm exited with {}: {}", output.status, stderr.trim())));
        }

        // -singlefile writes exactly `<prefix>.png`.
        let png = prefix.with_extension("png");
        if !png.exists() {
            return Ok(None);
        }

        image::open(&png)
            .map(Some)
            .map_err(|e| fail(format!("pdftoppm output unreadable: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poppler_command_uses_bin_dir() {
        let r = PopplerRasterizer::new("/tmp/in.pdf", Some(Path::new("/opt/poppler/bin")));
        assert!(r.command().starts_with("/opt/poppler/bin"));
        assert!(r
            .command()
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("pdftoppm")));
    }

    #[test]
    fn poppler_command_defaults_to_path_lookup() {
        let r = PopplerRasterizer::new("/tmp/in.pdf", None);
        assert_eq!(r.command().parent(), Some(Path::new("")));
    }

    #[test]
    fn missing_pdftoppm_is_a_page_error() {
        let bogus = tempfile::tempdir().unwrap();
        let r = PopplerRasterizer::new("/tmp/in.pdf", Some(bogus.path()));
        match r.rasterize(3, 300) {
            Err(PageError::RasterisationFailed { page, .. }) => assert_eq!(page, 3),
            other => panic!("expected rasterisation failure, got {other:?}"),
        }
    }
}
