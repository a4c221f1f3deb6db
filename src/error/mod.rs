//! Error types and handling for prodimg
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`archive`]: Spreadsheet container errors
//! - [`workbook`]: Sheet and column errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod archive;
pub mod config;
pub mod fs;
pub mod workbook;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for prodimg operations
#[derive(Error, Diagnostic, Debug)]
pub enum ProdimgError {
    // Archive errors
    #[error("Failed to open spreadsheet container: {path}: {reason}")]
    #[diagnostic(
        code(prodimg::archive::open_failed),
        help("The workbook must be an .xlsx file (a zip archive)")
    )]
    ArchiveOpenFailed { path: String, reason: String },

    #[error("Failed to extract '{entry}': {reason}")]
    #[diagnostic(code(prodimg::archive::extract_failed))]
    EntryExtractFailed { entry: String, reason: String },

    #[error("Failed to parse drawing part '{part}': {reason}")]
    #[diagnostic(code(prodimg::archive::drawing_parse_failed))]
    DrawingParseFailed { part: String, reason: String },

    // Workbook errors
    #[error("Failed to read workbook: {path}: {reason}")]
    #[diagnostic(code(prodimg::workbook::read_failed))]
    WorkbookReadFailed { path: String, reason: String },

    #[error("Sheet '{name}' not found")]
    #[diagnostic(
        code(prodimg::workbook::sheet_not_found),
        help("Set sheet.name in the config file, or remove it to use the first sheet")
    )]
    SheetNotFound { name: String },

    #[error("Workbook has no worksheet")]
    #[diagnostic(code(prodimg::workbook::no_worksheet))]
    NoWorksheet,

    #[error("Column '{column}' not found in header row {row}")]
    #[diagnostic(
        code(prodimg::workbook::column_not_found),
        help("Check sheet.header_row (0-based) and sheet.sku_column in the config file")
    )]
    ColumnNotFound { column: String, row: u32 },

    #[error("Image order does not match product rows: {reason}")]
    #[diagnostic(
        code(prodimg::workbook::correspondence_failed),
        help("Run without --strict to place images anyway, or fix the workbook so pictures follow row order")
    )]
    CorrespondenceFailed { reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(prodimg::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(prodimg::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(prodimg::config::invalid))]
    ConfigInvalid { message: String },

    #[error("No SKU mapping configured")]
    #[diagnostic(
        code(prodimg::config::mapping_missing),
        help("Remove the empty sku_map from prodimg.yaml, or use 'prodimg extract' for positional naming")
    )]
    MappingMissing,

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(prodimg::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(prodimg::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(prodimg::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Backup failed: {path}: {reason}")]
    #[diagnostic(
        code(prodimg::fs::backup_failed),
        help("Nothing was replaced. Remove the partial backup directory and run again")
    )]
    BackupFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(prodimg::fs::io_error))]
    IoError { message: String },

    // Image errors
    #[error("Failed to process image {path}: {reason}")]
    #[diagnostic(code(prodimg::image::process_failed))]
    ImageFailed { path: String, reason: String },

    #[error("{failed} image(s) failed to normalize")]
    #[diagnostic(code(prodimg::image::normalize_incomplete))]
    NormalizeIncomplete { failed: usize },
}

impl From<std::io::Error> for ProdimgError {
    fn from(err: std::io::Error) -> Self {
        ProdimgError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ProdimgError {
    fn from(err: serde_yaml::Error) -> Self {
        ProdimgError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProdimgError {
    fn from(err: serde_json::Error) -> Self {
        ProdimgError::IoError {
            message: format!("Failed to serialize report: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ProdimgError>;
