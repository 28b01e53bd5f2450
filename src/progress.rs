//! Progress-callback trait for per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! an event for every page as the assembler walks the document: whether the
//! native text layer was used, OCR produced the text, or the page failed.
//!
//! # Example
//!
//! ```rust
//! use pdf2md_ocr::{ConversionProgressCallback, ConversionConfig, ExtractionMethod};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct OcrCounter {
//!     ocr_pages: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for OcrCounter {
//!     fn on_page_complete(&self, _page: usize, _total: usize, method: ExtractionMethod, _len: usize) {
//!         if method == ExtractionMethod::Recognized {
//!             self.ocr_pages.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let counter = Arc::new(OcrCounter { ocr_pages: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::ExtractionMethod;
use std::sync::Arc;

/// Called by the assembler as it processes each page.
///
/// Pages are processed sequentially in ascending order, but the pipeline
/// runs on a blocking worker thread, so implementations must be
/// `Send + Sync`. All methods have default no-op implementations.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after the document is opened, before page 1.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called before the page's native text is read.
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when the page produced text (native or recognised).
    ///
    /// # Arguments
    /// * `page_num`:  1-indexed page number
    /// * `method`:    where the text came from
    /// * `text_len`:  character count of the page body
    fn on_page_complete(
        &self,
        page_num: usize,
        total_pages: usize,
        method: ExtractionMethod,
        text_len: usize,
    ) {
        let _ = (page_num, total_pages, method, text_len);
    }

    /// Called before `on_page_complete` when the page produced text but
    /// something is worth reporting, e.g. the page could not be rasterised
    /// and its body is empty.
    fn on_page_warning(&self, page_num: usize, total_pages: usize, message: &str) {
        let _ = (page_num, total_pages, message);
    }

    /// Called when OCR failed for the page; its body becomes the placeholder.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after every page has been attempted.
    ///
    /// # Arguments
    /// * `success_count`: pages that did not fail
    fn on_conversion_complete(&self, total_pages: usize, success_count: usize) {
        let _ = (total_pages, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        native: AtomicUsize,
        recognized: AtomicUsize,
        errors: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl ConversionProgressCallback for TrackingCallback {
        fn on_page_complete(&self, _page: usize, _total: usize, method: ExtractionMethod, _len: usize) {
            match method {
                ExtractionMethod::Native => self.native.fetch_add(1, Ordering::SeqCst),
                ExtractionMethod::Recognized => self.recognized.fetch_add(1, Ordering::SeqCst),
            };
        }

        fn on_page_error(&self, _page: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_conversion_complete(&self, _total: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_conversion_start(3);
        cb.on_page_start(1, 3);
        cb.on_page_complete(1, 3, ExtractionMethod::Native, 420);
        cb.on_page_warning(2, 3, "page could not be converted to an image");
        cb.on_page_error(2, 3, "tesseract exited with 1");
        cb.on_conversion_complete(3, 2);
    }

    #[test]
    fn tracking_callback_separates_methods() {
        let tracker = TrackingCallback::default();
        tracker.on_page_complete(1, 3, ExtractionMethod::Native, 500);
        tracker.on_page_complete(2, 3, ExtractionMethod::Recognized, 13);
        tracker.on_page_error(3, 3, "OCR failed");
        tracker.on_conversion_complete(3, 2);

        assert_eq!(tracker.native.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.recognized.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 2);
    }
}
