//! Conversion entry points.
//!
//! The pipeline itself is synchronous: pdfium, `pdftoppm` and `tesseract`
//! are all blocking, and pages are processed one after another. [`convert`]
//! runs it on tokio's blocking pool so async callers are not stalled;
//! [`convert_sync`] is the same thing for callers without a runtime.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::ConversionOutput;
use crate::pipeline::assemble::assemble_document;
use crate::pipeline::input;
use crate::pipeline::ocr::{RecognitionEngine, TesseractEngine};
use crate::pipeline::render::{PopplerRasterizer, Rasterizer};
use crate::pipeline::source::{bind_pdfium, PageSource, PdfiumDocument};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Convert a PDF file to page-annotated Markdown text.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(ConversionOutput)` whenever the document could be opened, even if
/// some pages failed OCR (check `output.stats.failed_pages`).
///
/// # Errors
/// Returns `Err(ConvertError)` only for fatal errors:
/// - File not found / permission denied / not a PDF
/// - Encrypted PDF without the right password, or a corrupt file
/// - pdfium library not found
pub async fn convert(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let input = input.as_ref();
    info!("Starting conversion: {}", input.display());

    let pdf_path = input::resolve_input(input)?;
    let config = config.clone();

    tokio::task::spawn_blocking(move || convert_blocking(&pdf_path, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("conversion task panicked: {}", e)))?
}

/// Convert a PDF and write the text artifact to `output_path`.
///
/// Nothing is written when the conversion fails fatally.
pub async fn convert_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let output = convert(input, config).await?;
    write_output(output_path.as_ref(), &output.text).await?;
    info!("Output written to {}", output_path.as_ref().display());
    Ok(output)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input, config))
}

/// Run the page loop over caller-supplied backends.
///
/// Useful for plugging in a different OCR engine or for driving the
/// pipeline from an in-memory page source.
pub fn convert_with<S, R, E>(
    source: &S,
    rasterizer: &R,
    engine: &E,
    config: &ConversionConfig,
) -> ConversionOutput
where
    S: PageSource + ?Sized,
    R: Rasterizer + ?Sized,
    E: RecognitionEngine + ?Sized,
{
    let start = Instant::now();
    let document = assemble_document(source, rasterizer, engine, config);
    let output = ConversionOutput::from_document(document, start.elapsed().as_millis() as u64);

    info!(
        "Conversion complete: {} pages ({} native, {} OCR, {} failed), {}ms total",
        output.stats.total_pages,
        output.stats.native_pages,
        output.stats.recognized_pages,
        output.stats.failed_pages,
        output.stats.total_duration_ms
    );
    output
}

/// Write `text` to `path` as UTF-8.
///
/// Missing parent directories are created. The text goes to a sibling
/// temp file first and is renamed into place, so a failed write never
/// leaves a truncated artifact behind.
pub async fn write_output(path: &Path, text: &str) -> Result<(), ConvertError> {
    let write_err = |source| ConvertError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = temp_sibling(path);
    debug!("Writing {} bytes to {}", text.len(), tmp_path.display());
    tokio::fs::write(&tmp_path, text).await.map_err(write_err)?;

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn convert_blocking(
    pdf_path: &Path,
    config: &ConversionConfig,
) -> Result<ConversionOutput, ConvertError> {
    let pdfium = bind_pdfium(config.tools.pdfium_library.as_deref())?;
    let document = PdfiumDocument::open(&pdfium, pdf_path, config.password.as_deref())?
        .with_max_rendered_pixels(config.max_rendered_pixels);
    let engine = TesseractEngine::new(config.tools.tesseract_cmd.as_deref());

    let poppler;
    let rasterizer: &dyn Rasterizer = match config.tools.poppler_bin.as_deref() {
        Some(bin) => {
            debug!("Rasterising with pdftoppm from {}", bin.display());
            poppler = PopplerRasterizer::new(pdf_path, Some(bin));
            &poppler
        }
        None => &document,
    };

    Ok(convert_with(&document, rasterizer, &engine, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_sibling_appends_suffix() {
        assert_eq!(
            temp_sibling(Path::new("out/report.md")),
            PathBuf::from("out/report.md.tmp")
        );
        assert_eq!(temp_sibling(Path::new("notes")), PathBuf::from("notes.tmp"));
    }

    #[tokio::test]
    async fn write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.md");
        write_output(&path, "## Page 1\nhello").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## Page 1\nhello");
        assert!(!temp_sibling(&path).exists());
    }

    #[tokio::test]
    async fn convert_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(dir.path().join("absent.pdf"), &ConversionConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }
}
