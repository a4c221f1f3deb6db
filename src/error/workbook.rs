//! Sheet and column errors

use std::path::Path;

use super::ProdimgError;

/// Creates a workbook read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::WorkbookReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a column not found error
pub fn column_not_found(column: impl Into<String>, row: u32) -> ProdimgError {
    ProdimgError::ColumnNotFound {
        column: column.into(),
        row,
    }
}

/// Creates a correspondence failed error
pub fn correspondence_failed(reason: impl Into<String>) -> ProdimgError {
    ProdimgError::CorrespondenceFailed {
        reason: reason.into(),
    }
}
