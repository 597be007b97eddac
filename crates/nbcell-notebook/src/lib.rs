//! # nbcell-notebook
//!
//! Jupyter Notebook (.ipynb) loading for nbcell.
//!
//! This crate reads a notebook file (nbformat 4.x) into an ordered sequence
//! of cells ready for reStructuredText export:
//! - Markdown cells (prose)
//! - Code cells with execution counts and captured outputs
//!   (text, images, error tracebacks)
//! - Raw cells (passed through untouched)
//! - Notebook metadata (kernel, language, title, authors)
//!
//! ## Example
//!
//! ```no_run
//! use nbcell_notebook::load_notebook;
//!
//! let notebook = load_notebook("example.ipynb")?;
//! for cell in &notebook.cells {
//!     println!("{}: {} output(s)", cell.kind(), cell.outputs().len());
//! }
//! # Ok::<(), nbcell_notebook::NotebookError>(())
//! ```

/// Error types for notebook loading
pub mod error;
/// Jupyter notebook (ipynb) loader
pub mod ipynb;

pub use error::{NotebookError, Result};
pub use ipynb::{
    load_notebook, parse_notebook, Cell, CellOutput, ImageFormat, Notebook, NotebookMetadata,
};
