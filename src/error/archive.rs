//! Spreadsheet container errors

use std::path::Path;

use super::ProdimgError;

/// Creates an archive open failed error
pub fn open_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::ArchiveOpenFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an entry extraction failed error
pub fn extract_failed(entry: impl Into<String>, reason: impl ToString) -> ProdimgError {
    ProdimgError::EntryExtractFailed {
        entry: entry.into(),
        reason: reason.to_string(),
    }
}

/// Creates a drawing parse failed error
pub fn drawing_parse_failed(part: impl Into<String>, reason: impl ToString) -> ProdimgError {
    ProdimgError::DrawingParseFailed {
        part: part.into(),
        reason: reason.to_string(),
    }
}
