//! # pdf2md-ocr
//!
//! Convert PDF documents to page-annotated Markdown text, using the PDF's
//! own text layer where it is good enough and OCR where it is not.
//!
//! ## Why hybrid?
//!
//! Born-digital pages carry an exact text layer: extracting it is fast and
//! lossless. Scanned pages carry none, or only a stray caption. Running OCR
//! on every page is slow and degrades good text; running it on none loses
//! the scans. Each page is therefore classified on its own: the text layer
//! is kept when its trimmed length reaches a threshold, otherwise the page
//! is rasterised and recognised with Tesseract.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     check the file exists and starts with %PDF
//!  ├─ 2. Source    load through pdfium, read each page's text layer
//!  ├─ 3. Classify  keep text with ≥ min_native_chars characters
//!  ├─ 4. Fallback  render (pdfium or pdftoppm) → tesseract
//!  └─ 5. Assemble  "## Page N" sections, in page order
//! ```
//!
//! A page that fails OCR still gets its section, with the body
//! `*(OCR failed for this page)*`; only problems opening the document or
//! writing the output are fatal.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2md_ocr::{convert_to_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .min_native_chars(100)
//!         .language("eng")
//!         .build()?;
//!     let output = convert_to_file("scan.pdf", "scan.md", &config).await?;
//!     eprintln!(
//!         "{} pages: {} native, {} OCR, {} failed",
//!         output.stats.total_pages,
//!         output.stats.native_pages,
//!         output.stats.recognized_pages,
//!         output.stats.failed_pages,
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## External Tools
//!
//! | Tool        | Needed for              | Located via                        |
//! |-------------|-------------------------|------------------------------------|
//! | libpdfium   | every run               | `ToolPaths::pdfium_library`, cwd, system |
//! | `tesseract` | pages sent to OCR       | `ToolPaths::tesseract_cmd`, `PATH` |
//! | `pdftoppm`  | only if Poppler is set  | `ToolPaths::poppler_bin`           |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2md-ocr` binary (clap + anyhow + indicatif + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ToolPaths};
pub use convert::{convert, convert_sync, convert_to_file, convert_with, write_output};
pub use error::{ConvertError, OcrError, PageError};
pub use output::{
    AssembledDocument, ConversionOutput, ConversionStats, ExtractionMethod, ExtractionResult,
    PageSection, OCR_FAILED_PLACEHOLDER,
};
pub use pipeline::ocr::{RecognitionEngine, TesseractEngine};
pub use pipeline::render::{PopplerRasterizer, Rasterizer};
pub use pipeline::source::{PageSource, PdfiumDocument};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
