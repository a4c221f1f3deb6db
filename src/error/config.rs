//! Configuration errors

use std::path::Path;

use super::ProdimgError;

/// Creates a config not found error
pub fn not_found(path: &Path) -> ProdimgError {
    ProdimgError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: &Path, reason: impl ToString) -> ProdimgError {
    ProdimgError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> ProdimgError {
    ProdimgError::ConfigInvalid {
        message: message.into(),
    }
}
