//! Native-text acceptance heuristic.
//!
//! A page whose trimmed text layer is shorter than the threshold is treated
//! as image-dominated (a scan with at most a caption or running header) and
//! sent to OCR. Length is counted in Unicode scalar values, not bytes, so
//! non-Latin scripts are not favoured.

/// `true` when the native text is long enough to use as-is.
pub fn is_native_text_acceptable(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() >= min_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_native_text_acceptable(&"a".repeat(100), 100));
        assert!(!is_native_text_acceptable(&"a".repeat(99), 100));
    }

    #[test]
    fn surrounding_whitespace_does_not_count() {
        let padded = format!("\n\n   {}   \n\x0c", "x".repeat(99));
        assert!(!is_native_text_acceptable(&padded, 100));
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 50 chars, 150 bytes.
        let cjk = "漢".repeat(50);
        assert!(!is_native_text_acceptable(&cjk, 100));
        assert!(is_native_text_acceptable(&cjk, 50));
    }

    #[test]
    fn empty_text_is_rejected_unless_threshold_zero() {
        assert!(!is_native_text_acceptable("", 1));
        assert!(is_native_text_acceptable("", 0));
    }
}
