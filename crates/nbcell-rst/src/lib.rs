//! # nbcell-rst
//!
//! reStructuredText rendering and snippet splitting for nbcell.
//!
//! Two stages, run back to back:
//! - [`export::export_notebook`] renders a loaded notebook into one
//!   composite rST document, with a recognizable boundary token between
//!   cell sections and image outputs extracted as assets.
//! - [`split::split_file`] re-segments the composite at those boundaries
//!   and writes one numbered snippet file per cell.
//!
//! ## Example
//!
//! ```no_run
//! use nbcell_notebook::load_notebook;
//! use nbcell_rst::{export_notebook, split_file};
//!
//! let notebook = load_notebook("example.ipynb")?;
//! let composite = export_notebook(&notebook)?;
//! std::fs::write("example.rst", &composite.text)?;
//! let report = split_file("example.rst".as_ref(), "cell-", false)?;
//! println!("{} snippet(s)", report.snippets.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Error types for export and splitting
pub mod error;
/// Notebook → composite rST rendering
pub mod export;
/// Composite → numbered snippet files
pub mod split;

pub use error::{ExportError, WriteError};
pub use export::{
    export_notebook, CompositeDocument, ImageAsset, BOUNDARY_SEPARATOR, BOUNDARY_TOKEN,
};
pub use split::{split_document, split_file, SplitReport};
