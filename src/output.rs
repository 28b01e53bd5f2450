//! Result types produced by a conversion run.
//!
//! Every page yields exactly one [`ExtractionResult`]; the assembler wraps
//! it in a [`PageSection`] and the ordered sections form an
//! [`AssembledDocument`], which renders to the final text artifact.

use crate::error::PageError;
use serde::{Deserialize, Serialize};

/// Body written for a page whose OCR fallback failed.
pub const OCR_FAILED_PLACEHOLDER: &str = "*(OCR failed for this page)*";

/// Where a page's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// The PDF text layer was long enough to keep.
    Native,
    /// The page was rasterised and run through OCR.
    Recognized,
}

/// Outcome for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// Trimmed native text.
    NativeText(String),
    /// Trimmed OCR text; empty when the page could not be rasterised.
    RecognizedText(String),
    /// OCR fallback failed; the body is [`OCR_FAILED_PLACEHOLDER`].
    Failed(PageError),
}

impl ExtractionResult {
    /// Text written under the page heading.
    pub fn body(&self) -> &str {
        match self {
            ExtractionResult::NativeText(text) | ExtractionResult::RecognizedText(text) => text,
            ExtractionResult::Failed(_) => OCR_FAILED_PLACEHOLDER,
        }
    }

    /// `None` for failed pages.
    pub fn method(&self) -> Option<ExtractionMethod> {
        match self {
            ExtractionResult::NativeText(_) => Some(ExtractionMethod::Native),
            ExtractionResult::RecognizedText(_) => Some(ExtractionMethod::Recognized),
            ExtractionResult::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ExtractionResult::Failed(_))
    }
}

/// One page's contribution to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    /// 1-indexed page number.
    pub page_num: usize,
    /// Markdown heading, `## Page N`.
    pub heading: String,
    pub result: ExtractionResult,
    /// Operator-facing note, e.g. why a recognised page is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    /// Wall-clock time spent on this page.
    pub duration_ms: u64,
}

impl PageSection {
    pub fn new(page_num: usize, result: ExtractionResult) -> Self {
        Self {
            page_num,
            heading: page_heading(page_num),
            result,
            diagnostic: None,
            duration_ms: 0,
        }
    }

    pub fn body(&self) -> &str {
        self.result.body()
    }

    /// `## Page N` followed by the body on the next line.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.heading, self.body())
    }
}

/// Heading line for a 1-indexed page.
pub fn page_heading(page_num: usize) -> String {
    format!("## Page {page_num}")
}

/// The ordered set of page sections for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledDocument {
    pub sections: Vec<PageSection>,
}

impl AssembledDocument {
    /// Concatenate sections in page order, separated by one blank line.
    ///
    /// An empty document renders to an empty string.
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(PageSection::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Counts and timings for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub total_pages: usize,
    pub native_pages: usize,
    pub recognized_pages: usize,
    pub failed_pages: usize,
    pub total_duration_ms: u64,
}

impl ConversionStats {
    pub fn from_document(document: &AssembledDocument, total_duration_ms: u64) -> Self {
        let mut stats = ConversionStats {
            total_pages: document.len(),
            total_duration_ms,
            ..Default::default()
        };
        for section in &document.sections {
            match section.result.method() {
                Some(ExtractionMethod::Native) => stats.native_pages += 1,
                Some(ExtractionMethod::Recognized) => stats.recognized_pages += 1,
                None => stats.failed_pages += 1,
            }
        }
        stats
    }

    /// Pages that produced text (native or recognised).
    pub fn succeeded_pages(&self) -> usize {
        self.native_pages + self.recognized_pages
    }
}

/// Everything a conversion run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The rendered text artifact.
    pub text: String,
    pub sections: Vec<PageSection>,
    pub stats: ConversionStats,
}

impl ConversionOutput {
    pub fn from_document(document: AssembledDocument, total_duration_ms: u64) -> Self {
        let stats = ConversionStats::from_document(&document, total_duration_ms);
        Self {
            text: document.render(),
            sections: document.sections,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(page: usize) -> ExtractionResult {
        ExtractionResult::Failed(PageError::RecognitionFailed {
            page,
            detail: "engine crashed".into(),
        })
    }

    #[test]
    fn failed_body_is_placeholder() {
        assert_eq!(failed(1).body(), OCR_FAILED_PLACEHOLDER);
        assert_eq!(failed(1).method(), None);
    }

    #[test]
    fn section_renders_heading_then_body() {
        let s = PageSection::new(4, ExtractionResult::RecognizedText("Scanned Title".into()));
        assert_eq!(s.render(), "## Page 4\nScanned Title");
    }

    #[test]
    fn empty_recognized_section_keeps_heading() {
        let s = PageSection::new(2, ExtractionResult::RecognizedText(String::new()));
        assert_eq!(s.render(), "## Page 2\n");
    }

    #[test]
    fn empty_document_renders_empty_string() {
        assert_eq!(AssembledDocument::default().render(), "");
    }

    #[test]
    fn sections_joined_by_blank_line() {
        let doc = AssembledDocument {
            sections: vec![
                PageSection::new(1, ExtractionResult::NativeText("alpha".into())),
                PageSection::new(2, failed(2)),
            ],
        };
        assert_eq!(
            doc.render(),
            "## Page 1\nalpha\n\n## Page 2\n*(OCR failed for this page)*"
        );
    }

    #[test]
    fn stats_count_each_method() {
        let doc = AssembledDocument {
            sections: vec![
                PageSection::new(1, ExtractionResult::NativeText("a".into())),
                PageSection::new(2, ExtractionResult::RecognizedText("b".into())),
                PageSection::new(3, ExtractionResult::RecognizedText(String::new())),
                PageSection::new(4, failed(4)),
            ],
        };
        let stats = ConversionStats::from_document(&doc, 12);
        assert_eq!(stats.total_pages, 4);
        assert_eq!(stats.native_pages, 1);
        assert_eq!(stats.recognized_pages, 2);
        assert_eq!(stats.failed_pages, 1);
        assert_eq!(stats.succeeded_pages(), 3);
    }

    #[test]
    fn extraction_result_json_is_tagged() {
        let json = serde_json::to_string(&ExtractionResult::NativeText("hi".into())).unwrap();
        assert_eq!(json, r#"{"kind":"native_text","value":"hi"}"#);
    }
}
