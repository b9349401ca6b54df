//! Unified application error type.
//! All modules (core, cli, config, export, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid time format: {0} (expected HHMMSS or HH:MM:SS)")]
    InvalidFormat(String),

    #[error("Invalid timestamp: {0} (expected HH:MM:SS:mmm)")]
    InvalidTimestamp(String),

    #[error("Invalid key event: {0}")]
    InvalidKeyEvent(String),

    // ---------------------------
    // Log / history errors
    // ---------------------------
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Index {index} out of range (log has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Entry not found in log: {0}")]
    EntryNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Errors that only mean "there was nothing to do": the CLI shows them
    /// as a notice instead of failing.
    pub fn is_notice(&self) -> bool {
        matches!(self, AppError::NothingToUndo | AppError::NothingToRedo)
    }
}

pub type AppResult<T> = Result<T, AppError>;
