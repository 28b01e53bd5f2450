//! OCR fallback for a single page.
//!
//! [`recognize_page`] is the containment boundary for page-level failures:
//! it returns a [`FallbackOutcome`], never a `Result`, so nothing the
//! rasteriser or the engine does can abort the remaining pages.
//!
//! | Rasteriser      | Engine    | Result                                 |
//! |-----------------|-----------|----------------------------------------|
//! | `Err`           | n/a       | `Failed` + diagnostic                  |
//! | `Ok(None)`      | n/a       | `RecognizedText("")` + diagnostic      |
//! | `Ok(Some(img))` | `Err`     | `Failed` + diagnostic                  |
//! | `Ok(Some(img))` | `Ok(txt)` | `RecognizedText(txt.trim())`           |

use crate::config::ConversionConfig;
use crate::error::{OcrError, PageError};
use crate::output::ExtractionResult;
use crate::pipeline::ocr::RecognitionEngine;
use crate::pipeline::postprocess;
use crate::pipeline::render::Rasterizer;
use tracing::{debug, warn};

/// Diagnostic attached to a page whose rasterisation produced no image.
pub const NO_IMAGE_DIAGNOSTIC: &str = "page could not be converted to an image";

/// What the fallback produced for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackOutcome {
    /// Always `RecognizedText` or `Failed`.
    pub result: ExtractionResult,
    pub diagnostic: Option<String>,
}

/// Rasterise and recognise page `page_num`.
pub fn recognize_page<R, E>(
    page_num: usize,
    rasterizer: &R,
    engine: &E,
    config: &ConversionConfig,
) -> FallbackOutcome
where
    R: Rasterizer + ?Sized,
    E: RecognitionEngine + ?Sized,
{
    match try_recognize(page_num, rasterizer, engine, config) {
        Ok(Some(text)) => {
            debug!("Page {}: OCR produced {} chars", page_num, text.chars().count());
            FallbackOutcome {
                result: ExtractionResult::RecognizedText(text),
                diagnostic: None,
            }
        }
        Ok(None) => {
            warn!("Page {}: {}", page_num, NO_IMAGE_DIAGNOSTIC);
            FallbackOutcome {
                result: ExtractionResult::RecognizedText(String::new()),
                diagnostic: Some(NO_IMAGE_DIAGNOSTIC.to_string()),
            }
        }
        Err(err) => {
            warn!("{}", err);
            FallbackOutcome {
                diagnostic: Some(err.to_string()),
                result: ExtractionResult::Failed(err),
            }
        }
    }
}

fn try_recognize<R, E>(
    page_num: usize,
    rasterizer: &R,
    engine: &E,
    config: &ConversionConfig,
) -> Result<Option<String>, PageError>
where
    R: Rasterizer + ?Sized,
    E: RecognitionEngine + ?Sized,
{
    let Some(image) = rasterizer.rasterize(page_num, config.dpi)? else {
        return Ok(None);
    };

    let raw = engine
        .recognize(&image, &config.language)
        .map_err(|e| match e {
            OcrError::Encode(err) => PageError::ImageEncodingFailed {
                page: page_num,
                detail: err.to_string(),
            },
            other => PageError::RecognitionFailed {
                page: page_num,
                detail: other.to_string(),
            },
        })?;

    let text = if config.clean_recognized_text {
        postprocess::clean_recognized_text(&raw)
    } else {
        raw
    };
    Ok(Some(text.trim().to_string()))
}
