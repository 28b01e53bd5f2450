//! Document assembly: the per-page extraction loop.
//!
//! Pages are visited strictly in ascending order, one at a time. Each page
//! yields exactly one section, whatever happened to it, so the output always
//! has as many `## Page N` headings as the document has pages.

use crate::config::ConversionConfig;
use crate::output::{AssembledDocument, ExtractionResult, PageSection};
use crate::pipeline::classify::is_native_text_acceptable;
use crate::pipeline::fallback::{recognize_page, FallbackOutcome};
use crate::pipeline::ocr::RecognitionEngine;
use crate::pipeline::render::Rasterizer;
use crate::pipeline::source::PageSource;
use std::time::Instant;
use tracing::{info, warn};

/// Run every page of `source` through the classifier and, where needed, the
/// OCR fallback.
pub fn assemble_document<S, R, E>(
    source: &S,
    rasterizer: &R,
    engine: &E,
    config: &ConversionConfig,
) -> AssembledDocument
where
    S: PageSource + ?Sized,
    R: Rasterizer + ?Sized,
    E: RecognitionEngine + ?Sized,
{
    let total_pages = source.page_count();
    info!("Processing {} pages", total_pages);

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(total_pages);
    }

    let mut sections = Vec::with_capacity(total_pages);

    for page_num in 1..=total_pages {
        let page_start = Instant::now();
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total_pages);
        }

        let native = source.native_text(page_num).unwrap_or_else(|e| {
            warn!("{}", e);
            String::new()
        });

        let mut section = if is_native_text_acceptable(&native, config.min_native_chars) {
            info!("Page {}: extracted text directly", page_num);
            PageSection::new(page_num, ExtractionResult::NativeText(native.trim().to_string()))
        } else {
            info!("Page {}: minimal text found, attempting OCR", page_num);
            let FallbackOutcome { result, diagnostic } =
                recognize_page(page_num, rasterizer, engine, config);
            match (&result, &diagnostic) {
                (ExtractionResult::Failed(_), _) => info!("Page {}: OCR failed", page_num),
                (_, Some(note)) => info!("Page {}: {}", page_num, note),
                _ => info!("Page {}: OCR successful", page_num),
            }
            let mut section = PageSection::new(page_num, result);
            section.diagnostic = diagnostic;
            section
        };
        section.duration_ms = page_start.elapsed().as_millis() as u64;

        if let Some(ref cb) = config.progress_callback {
            match section.result.method() {
                Some(method) => {
                    if let Some(ref note) = section.diagnostic {
                        cb.on_page_warning(page_num, total_pages, note);
                    }
                    let text_len = section.body().chars().count();
                    cb.on_page_complete(page_num, total_pages, method, text_len)
                }
                None => cb.on_page_error(
                    page_num,
                    total_pages,
                    section.diagnostic.as_deref().unwrap_or("OCR failed"),
                ),
            }
        }

        sections.push(section);
    }

    let document = AssembledDocument { sections };

    if let Some(ref cb) = config.progress_callback {
        let failed = document
            .sections
            .iter()
            .filter(|s| s.result.is_failed())
            .count();
        cb.on_conversion_complete(total_pages, total_pages - failed);
    }

    document
}
