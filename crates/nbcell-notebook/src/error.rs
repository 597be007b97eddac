//! Error types for notebook loading

use std::path::PathBuf;
use thiserror::Error;

/// Error type for notebook loading operations
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Input path does not exist
    #[error("Notebook not found: {0}")]
    NotFound(PathBuf),

    /// I/O error when reading the notebook file
    #[error("Failed to read notebook file: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not a well-formed nbformat 4 document
    #[error("Failed to parse notebook JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Structurally valid JSON that is not a supported notebook
    #[error("Invalid notebook format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for notebook loading operations
pub type Result<T> = std::result::Result<T, NotebookError>;
