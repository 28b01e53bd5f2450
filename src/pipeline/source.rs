//! Page source: page count and per-page native text.
//!
//! [`PdfiumDocument`] is the production implementation. It holds the loaded
//! pdfium document for the whole run and also implements
//! [`crate::pipeline::render::Rasterizer`], so the default pipeline opens
//! the PDF exactly once.

use crate::error::{ConvertError, PageError};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Read-only access to a loaded document.
///
/// Page numbers are 1-indexed throughout.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// The text layer of page `page_num`, untrimmed, possibly empty.
    fn native_text(&self, page_num: usize) -> Result<String, PageError>;
}

/// Bind to the pdfium shared library.
///
/// With an explicit directory only that directory is tried. Otherwise the
/// current directory is tried first, then the system library path.
pub fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium, ConvertError> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ConvertError::PdfiumBindingFailed(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

/// A PDF opened through pdfium.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    pub(crate) max_rendered_pixels: u32,
}

impl<'a> PdfiumDocument<'a> {
    /// Load the PDF at `path`. Failure here is fatal for the run.
    ///
    /// pdfium keeps the password for the document's lifetime, so it must
    /// outlive the returned value.
    pub fn open(
        pdfium: &'a Pdfium,
        path: &Path,
        password: Option<&'a str>,
    ) -> Result<Self, ConvertError> {
        let document = pdfium.load_pdf_from_file(path, password).map_err(|e| {
            let err_str = format!("{:?}", e);
            if err_str.contains("Password") || err_str.contains("password") {
                if password.is_some() {
                    ConvertError::WrongPassword {
                        path: path.to_path_buf(),
                    }
                } else {
                    ConvertError::PasswordRequired {
                        path: path.to_path_buf(),
                    }
                }
            } else {
                ConvertError::CorruptPdf {
                    path: path.to_path_buf(),
                    detail: err_str,
                }
            }
        })?;

        info!(
            "PDF loaded: {} ({} pages)",
            path.display(),
            document.pages().len()
        );

        Ok(Self {
            document,
            max_rendered_pixels: 10_000,
        })
    }

    /// Cap the longest rendered edge, in pixels.
    pub fn with_max_rendered_pixels(mut self, px: u32) -> Self {
        self.max_rendered_pixels = px;
        self
    }

    /// Fetch a page by 1-indexed number.
    pub(crate) fn page(&self, page_num: usize) -> Result<PdfPage<'a>, String> {
        let index = page_num
            .checked_sub(1)
            .and_then(|i| u16::try_from(i).ok())
            .ok_or_else(|| format!("page {page_num} is out of range"))?;
        self.document
            .pages()
            .get(index)
            .map_err(|e| format!("{:?}", e))
    }
}

impl PageSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn native_text(&self, page_num: usize) -> Result<String, PageError> {
        let page = self
            .page(page_num)
            .map_err(|detail| PageError::NativeTextUnavailable {
                page: page_num,
                detail,
            })?;
        let text = page
            .text()
            .map_err(|e| PageError::NativeTextUnavailable {
                page: page_num,
                detail: format!("{:?}", e),
            })?
            .all();
        debug!("Page {}: {} chars in text layer", page_num, text.chars().count());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use std::io::Write;

    #[test]
    fn open_borrows_password_from_config() {
        // Needs libpdfium at runtime; the borrow itself is checked at build time.
        let Ok(pdfium) = bind_pdfium(None) else {
            return;
        };
        let config = ConversionConfig::builder().password("secret").build().unwrap();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\ngarbage").unwrap();

        let result = PdfiumDocument::open(&pdfium, f.path(), config.password.as_deref());
        assert!(result.is_err());
    }
}
