//! Post-processing: deterministic cleanup of OCR output.
//!
//! Tesseract output is plain text, but scans regularly produce CRLF line
//! endings (when the engine runs on Windows), ragged trailing spaces, long
//! runs of empty lines between detected blocks, and stray zero-width
//! characters. These rules fix those without touching the words themselves.
//!
//! Only applied when [`crate::ConversionConfig::clean_recognized_text`] is
//! set, and never to native text.
//!
//! ## Rule Order
//!
//! Line endings are normalised first so the per-line and blank-line rules see
//! `\n` only; invisible characters are stripped before trailing-whitespace
//! trimming so a line holding only a zero-width space becomes empty.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to raw OCR text.
///
/// Rules (applied in order):
/// 1. Normalise line endings (CRLF / CR → LF)
/// 2. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens)
/// 3. Trim trailing whitespace per line
/// 4. Collapse 2+ consecutive blank lines down to 1
pub fn clean_recognized_text(input: &str) -> String {
    let s = normalise_line_endings(input);
    let s = remove_invisible_chars(&s);
    let s = trim_trailing_whitespace(&s);
    collapse_blank_lines(&s)
}

// ── Rule 1: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 2: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_line_endings() {
        assert_eq!(normalise_line_endings("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_trim_trailing_whitespace() {
        assert_eq!(
            trim_trailing_whitespace("  invoice   \ntotal\t"),
            "  invoice\ntotal"
        );
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_remove_invisible() {
        let input = "hello\u{200B}world\u{FEFF}foo\u{00AD}bar";
        assert_eq!(remove_invisible_chars(input), "helloworldfoobar");
    }

    #[test]
    fn test_zero_width_only_line_becomes_blank() {
        let input = "top\r\n\u{200B}  \r\n\r\n\r\nbottom   ";
        assert_eq!(clean_recognized_text(input), "top\n\nbottom");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let input = "Scanned  \r\n\r\n\r\n\r\nTitle\u{FEFF}\n";
        let once = clean_recognized_text(input);
        assert_eq!(clean_recognized_text(&once), once);
    }
}
