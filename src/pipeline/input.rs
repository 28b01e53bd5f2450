//! Input validation: make sure the user-supplied path is a readable PDF.
//!
//! Runs before pdfium is touched, so a missing or mistyped input fails with
//! a clear message instead of a pdfium load error, and before any page is
//! processed.

use crate::error::ConvertError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validate a local PDF path: existence, read permission and `%PDF` magic.
pub fn resolve_input(path: &Path) -> Result<PathBuf, ConvertError> {
    let path = path.to_path_buf();

    if !path.is_file() {
        return Err(ConvertError::FileNotFound { path });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied { path });
        }
        Err(_) => return Err(ConvertError::FileNotFound { path }),
    };

    let mut magic = [0u8; 4];
    let mut filled = 0;
    while filled < magic.len() {
        match file.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(ConvertError::CorruptPdf {
                    path,
                    detail: e.to_string(),
                })
            }
        }
    }
    if &magic != b"%PDF" {
        return Err(ConvertError::NotAPdf { path, magic });
    }

    debug!("Resolved local PDF: {}", path.display());
    Ok(path)
}
