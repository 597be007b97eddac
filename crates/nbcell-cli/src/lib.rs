//! Command-line interface for nbcell notebook conversion
//!
//! This crate provides the `nbcell` command-line tool for converting a
//! Jupyter notebook (.ipynb) into reStructuredText and splitting the result
//! into numbered snippet files for inclusion in Sphinx documentation.
//!
//! # Quick Start
//!
//! ```bash
//! # Convert a notebook into cell-1.rst, cell-2.rst, ...
//! nbcell convert -n analysis.ipynb
//!
//! # Custom prefix and output directory, keeping the composite .rst
//! nbcell convert -n analysis.ipynb --prefix snip- -o docs/snippets --keep
//!
//! # Inspect a notebook without converting
//! nbcell info -n analysis.ipynb
//! ```
//!
//! # Exit Codes
//!
//! - `0` - Success
//! - non-zero - The pipeline stopped; the message names the failing stage
//!   (load, export, write, or split) and the offending path.
//!
//! # Library Usage
//!
//! The conversion pipeline is exposed as library code so integration tests
//! (and build scripts) can drive it without spawning the binary:
//!
//! ```no_run
//! use nbcell_cli::{run_convert, ConvertOptions};
//!
//! let report = run_convert(&ConvertOptions::new("analysis.ipynb"))?;
//! println!("{} snippet(s) written", report.snippets.len());
//! # Ok::<(), nbcell_cli::PipelineError>(())
//! ```

/// The load → export → write → split pipeline
pub mod pipeline;

pub use pipeline::{run_convert, ConvertOptions, ConvertReport, PipelineError};
