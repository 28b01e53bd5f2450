//! Error types for the pdf2md-ocr library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`]: **Fatal**: the conversion cannot proceed at all
//!   (missing input file, not a PDF, wrong password, unwritable output).
//!   Returned as `Err(ConvertError)` from the top-level `convert*` functions.
//!
//! * [`PageError`]: **Non-fatal**: a single page could not be rasterised or
//!   recognised, but every other page is fine. Stored inside
//!   [`crate::output::ExtractionResult::Failed`] so the page still gets its
//!   section in the output, with a placeholder body.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2md-ocr library.
///
/// Page-level failures use [`PageError`] and never surface here.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── PDF errors ────────────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Place libpdfium next to the executable, install it system-wide,\n\
or point --pdfium-lib (PDF2MD_PDFIUM_LIB) at the directory containing it.\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error raised by a [`crate::pipeline::ocr::RecognitionEngine`].
///
/// Never escapes the OCR fallback: it is converted into a [`PageError`]
/// tagged with the page number.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The rendered page could not be encoded for the engine.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The engine executable could not be started.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and reported failure.
    #[error("'{command}' exited with {status}: {stderr}")]
    Exit {
        command: PathBuf,
        status: String,
        stderr: String,
    },

    /// Any other engine-specific failure.
    #[error("{0}")]
    Engine(String),
}

/// A non-fatal error for a single page.
///
/// Held by [`crate::output::ExtractionResult::Failed`]. The conversion always
/// continues with the next page.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// The document model could not produce the page's text layer.
    ///
    /// Never terminal: the assembler treats the page as having no native
    /// text and routes it to recognition.
    #[error("Page {page}: native text unavailable: {detail}")]
    NativeTextUnavailable { page: usize, detail: String },

    /// Page rasterisation failed.
    #[error("Page {page}: rasterisation failed: {detail}")]
    RasterisationFailed { page: usize, detail: String },

    /// The rendered page could not be handed to the recognition engine.
    #[error("Page {page}: image encoding failed: {detail}")]
    ImageEncodingFailed { page: usize, detail: String },

    /// The recognition engine was unavailable or returned an error.
    #[error("Page {page}: OCR failed: {detail}")]
    RecognitionFailed { page: usize, detail: String },
}

impl PageError {
    /// The 1-indexed page this error belongs to.
    pub fn page(&self) -> usize {
        match self {
            PageError::NativeTextUnavailable { page, .. }
            | PageError::RasterisationFailed { page, .. }
            | PageError::ImageEncodingFailed { page, .. }
            | PageError::RecognitionFailed { page, .. } => *page,
        }
    }
}
