//! Pipeline stages for hybrid PDF-to-Markdown conversion.
//!
//! ## Data Flow
//!
//! ```text
//!             ┌──────────── accepted ───────────────┐
//! source ──▶ classify                                ├──▶ assemble
//! (pdfium)    └─ rejected ─▶ render ──▶ ocr ──┬──────┘
//!                           (pdfium|poppler)  │
//!                                        postprocess
//! ```
//!
//! 1. [`input`]: validate the input path before pdfium sees it
//! 2. [`source`]: page count and text layer per page
//! 3. [`classify`]: keep or reject the text layer
//! 4. [`render`]: rasterise rejected pages
//! 5. [`encode`]: write the raster as PNG for the OCR engine
//! 6. [`ocr`]: recognise text from the raster
//! 7. [`postprocess`]: optional cleanup of OCR text
//! 8. [`fallback`]: steps 4–7 for one page, with failures contained
//! 9. [`assemble`]: the ordered per-page loop

pub mod assemble;
pub mod classify;
pub mod encode;
pub mod fallback;
pub mod input;
pub mod ocr;
pub mod postprocess;
pub mod render;
pub mod source;
