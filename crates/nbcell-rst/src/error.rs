//! Error types for rST export and snippet splitting

use std::path::PathBuf;
use thiserror::Error;

/// Error type for the rST exporter
#[derive(Error, Debug)]
pub enum ExportError {
    /// An output carried no representation the exporter can render
    #[error("Unrecognized output shape in cell {cell}, output {output}")]
    UnsupportedOutput {
        /// Zero-based cell index
        cell: usize,
        /// Zero-based output index within the cell
        output: usize,
    },

    /// An image payload failed to decode
    #[error("Invalid image payload in cell {cell}, output {output}: {source}")]
    InvalidImage {
        /// Zero-based cell index
        cell: usize,
        /// Zero-based output index within the cell
        output: usize,
        /// Decoder error
        source: base64::DecodeError,
    },

    /// A cell's rendered content contains the boundary token. Exporting it
    /// would make the splitter mis-segment the composite, so we refuse.
    #[error("Cell {cell} content collides with the cell boundary token")]
    BoundaryCollision {
        /// Zero-based cell index
        cell: usize,
    },
}

/// Error type for the snippet splitter
#[derive(Error, Debug)]
pub enum WriteError {
    /// The composite file could not be read back for splitting
    #[error("Failed to read composite file {path}: {source}")]
    ReadComposite {
        /// Composite file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A snippet file could not be written
    #[error("Failed to write snippet file {path}: {source}")]
    Snippet {
        /// Snippet file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The composite file could not be removed after splitting
    #[error("Failed to remove composite file {path}: {source}")]
    Cleanup {
        /// Composite file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
