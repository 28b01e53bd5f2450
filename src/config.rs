//! Configuration types for hybrid PDF-to-Markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. External tool locations live in
//! [`ToolPaths`], which is handed to the page source, rasteriser and OCR
//! engine constructors; nothing is configured through process-wide state.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Minimum trimmed native-text length (in characters) accepted without OCR.
pub const DEFAULT_MIN_NATIVE_CHARS: usize = 100;

/// Rasterisation resolution used for the OCR fallback.
pub const DEFAULT_DPI: u32 = 300;

/// Tesseract language hint.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Locations of the external engines the pipeline drives.
///
/// Every field is optional; `None` means "look in the usual place"
/// (next to the executable / system library path for pdfium, `PATH` for the
/// command-line tools).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    /// Directory containing the platform pdfium library.
    pub pdfium_library: Option<PathBuf>,

    /// Poppler `bin` directory. When set, pages are rasterised with
    /// `pdftoppm` from this directory instead of pdfium.
    pub poppler_bin: Option<PathBuf>,

    /// Path to the `tesseract` executable.
    pub tesseract_cmd: Option<PathBuf>,
}

/// Configuration for a conversion run.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2md_ocr::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .dpi(300)
///     .min_native_chars(100)
///     .language("eng+deu")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Pages whose trimmed native text has fewer characters than this are
    /// sent to OCR. Default: 100.
    ///
    /// A heuristic, not a quality judgement: a scanned page often carries
    /// only a caption or a running header in its text layer.
    pub min_native_chars: usize,

    /// Rendering DPI for the OCR fallback. Range: 72–600. Default: 300.
    pub dpi: u32,

    /// Maximum rendered image dimension (width or height) in pixels. Default: 10 000.
    ///
    /// Only honoured by the pdfium rasteriser. Keeps an oversized page
    /// (posters, engineering drawings) from allocating gigabytes at 300 DPI.
    pub max_rendered_pixels: u32,

    /// Tesseract language hint, e.g. "eng" or "eng+fra". Default: "eng".
    pub language: String,

    /// External tool locations.
    pub tools: ToolPaths,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Apply whitespace/invisible-character cleanup to OCR output. Default: false.
    ///
    /// Native text is never cleaned beyond trimming.
    pub clean_recognized_text: bool,

    /// Optional per-page progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            min_native_chars: DEFAULT_MIN_NATIVE_CHARS,
            dpi: DEFAULT_DPI,
            max_rendered_pixels: 10_000,
            language: DEFAULT_LANGUAGE.to_string(),
            tools: ToolPaths::default(),
            password: None,
            clean_recognized_text: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("min_native_chars", &self.min_native_chars)
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("language", &self.language)
            .field("tools", &self.tools)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("clean_recognized_text", &self.clean_recognized_text)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn min_native_chars(mut self, n: usize) -> Self {
        self.config.min_native_chars = n;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = px.max(100);
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.config.language = lang.into();
        self
    }

    pub fn tools(mut self, tools: ToolPaths) -> Self {
        self.config.tools = tools;
        self
    }

    pub fn pdfium_library(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tools.pdfium_library = Some(dir.into());
        self
    }

    pub fn poppler_bin(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.tools.poppler_bin = Some(dir.into());
        self
    }

    pub fn tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.config.tools.tesseract_cmd = Some(cmd.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn clean_recognized_text(mut self, v: bool) -> Self {
        self.config.clean_recognized_text = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(ConvertError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.language.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let c = ConversionConfig::default();
        assert_eq!(c.min_native_chars, 100);
        assert_eq!(c.dpi, 300);
        assert_eq!(c.language, "eng");
        assert!(c.tools.poppler_bin.is_none());
        assert!(!c.clean_recognized_text);
    }

    #[test]
    fn builder_rejects_out_of_range_dpi() {
        assert!(ConversionConfig::builder().dpi(50).build().is_err());
        assert!(ConversionConfig::builder().dpi(1200).build().is_err());
        assert!(ConversionConfig::builder().dpi(600).build().is_ok());
    }

    #[test]
    fn builder_rejects_empty_language() {
        let err = ConversionConfig::builder().language("  ").build().unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfig(_)));
    }

    #[test]
    fn builder_sets_tool_paths() {
        let c = ConversionConfig::builder()
            .poppler_bin("/opt/poppler/bin")
            .tesseract_cmd("/usr/local/bin/tesseract")
            .build()
            .unwrap();
        assert_eq!(c.tools.poppler_bin, Some(PathBuf::from("/opt/poppler/bin")));
        assert_eq!(
            c.tools.tesseract_cmd,
            Some(PathBuf::from("/usr/local/bin/tesseract"))
        );
        assert!(c.tools.pdfium_library.is_none());
    }

    #[test]
    fn debug_redacts_password() {
        let c = ConversionConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}
