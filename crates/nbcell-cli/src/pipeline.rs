//! The conversion pipeline: load → export → write → split.
//!
//! Each invocation is stateless and strictly sequential. All errors are
//! fatal; output files written before a failure are left on disk.

use nbcell_notebook::{load_notebook, NotebookError};
use nbcell_rst::{export_notebook, split_file, ExportError, WriteError};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Options for one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Path to the input notebook (.ipynb)
    pub notebook: PathBuf,
    /// Snippet filename prefix
    pub prefix: String,
    /// Retain the composite .rst file after splitting
    pub keep: bool,
    /// Directory receiving the composite, assets and snippets
    pub output_dir: PathBuf,
}

impl ConvertOptions {
    /// Options with the default prefix (`cell-`), `keep` off and the
    /// current working directory as output directory
    pub fn new(notebook: impl Into<PathBuf>) -> Self {
        Self {
            notebook: notebook.into(),
            prefix: "cell-".to_string(),
            keep: false,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Pipeline failure, tagged with the stage that stopped the run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The notebook could not be loaded
    #[error("load stage failed: {0}")]
    Load(#[from] NotebookError),

    /// The notebook could not be rendered to rST
    #[error("export stage failed: {0}")]
    Export(#[from] ExportError),

    /// The composite file or an asset could not be written
    #[error("write stage failed for {path}: {source}")]
    Write {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The composite could not be split into snippets
    #[error("split stage failed: {0}")]
    Split(#[from] WriteError),
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    /// Number of cells in the input notebook
    pub cells: usize,
    /// Path of the composite .rst file
    pub composite_path: PathBuf,
    /// Whether the composite file is still on disk
    pub composite_kept: bool,
    /// Snippet files written, in numbering order
    pub snippets: Vec<PathBuf>,
    /// Image asset files written
    pub assets: Vec<PathBuf>,
}

/// Run the full conversion pipeline for one notebook.
///
/// Loads the notebook, renders the composite rST document, writes it (plus
/// extracted image assets) into the output directory, then splits it into
/// `{prefix}{n}.rst` snippet files. The composite is removed afterwards
/// unless `keep` is set.
///
/// # Errors
///
/// Returns a [`PipelineError`] naming the stage that failed.
pub fn run_convert(options: &ConvertOptions) -> Result<ConvertReport, PipelineError> {
    let notebook = load_notebook(&options.notebook)?;
    log::debug!(
        "loaded {} with {} cell(s)",
        options.notebook.display(),
        notebook.cells.len()
    );

    let composite = export_notebook(&notebook)?;

    fs::create_dir_all(&options.output_dir).map_err(|source| PipelineError::Write {
        path: options.output_dir.clone(),
        source,
    })?;

    let stem = options
        .notebook
        .file_stem()
        .map_or_else(|| "notebook".to_string(), |s| s.to_string_lossy().into_owned());
    let composite_path = options.output_dir.join(format!("{stem}.rst"));
    fs::write(&composite_path, &composite.text).map_err(|source| PipelineError::Write {
        path: composite_path.clone(),
        source,
    })?;

    let mut assets = Vec::with_capacity(composite.assets.len());
    for asset in &composite.assets {
        let path = options.output_dir.join(&asset.filename);
        fs::write(&path, &asset.bytes).map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;
        assets.push(path);
    }

    let report = split_file(&composite_path, &options.prefix, options.keep)?;

    Ok(ConvertReport {
        cells: notebook.cells.len(),
        composite_path,
        composite_kept: report.composite_kept,
        snippets: report.snippets,
        assets,
    })
}
