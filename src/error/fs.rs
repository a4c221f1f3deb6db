//! File system errors

use std::path::Path;

use super::ProdimgError;

/// Creates a file not found error
pub fn not_found(path: &Path) -> ProdimgError {
    ProdimgError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::FileWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a backup failed error
pub fn backup_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::BackupFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
