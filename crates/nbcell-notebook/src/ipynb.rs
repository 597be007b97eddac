use crate::error::{NotebookError, Result};
use jupyter_protocol::media::MediaType;
use nbformat::v4::{Cell as RawCell, Notebook as RawNotebook, Output as RawOutput};
use std::fs;
use std::path::Path;

/// A loaded Jupyter Notebook: ordered cells plus notebook-level metadata.
///
/// Cell order is preserved exactly as it appears in the file and is never
/// reordered or deduplicated downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    /// Notebook-level metadata
    pub metadata: NotebookMetadata,
    /// Cells in file order
    pub cells: Vec<Cell>,
}

/// Notebook-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookMetadata {
    /// Kernel name (e.g., "python3", "ir")
    pub kernel_name: Option<String>,
    /// Programming language name (e.g., "python", "R")
    pub language_name: Option<String>,
    /// List of author names
    pub authors: Vec<String>,
    /// Notebook title if specified
    pub title: Option<String>,
}

impl NotebookMetadata {
    /// Language used for code-block directives, falling back to the kernel
    /// name and finally to "python".
    #[must_use]
    pub fn code_language(&self) -> &str {
        self.language_name
            .as_deref()
            .or(self.kernel_name.as_deref())
            .unwrap_or("python")
    }
}

/// A notebook cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Prose cell, markdown source
    Markdown {
        /// Cell source text
        source: String,
    },
    /// Executable cell with captured outputs
    Code {
        /// Cell source text
        source: String,
        /// Execution count, if the cell has been run
        execution_count: Option<i32>,
        /// Captured outputs in execution order
        outputs: Vec<CellOutput>,
    },
    /// Raw cell, passed through untouched
    Raw {
        /// Cell source text
        source: String,
    },
}

impl Cell {
    /// Cell source text
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Markdown { source } | Self::Code { source, .. } | Self::Raw { source } => source,
        }
    }

    /// Cell kind as a short label
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Markdown { .. } => "markdown",
            Self::Code { .. } => "code",
            Self::Raw { .. } => "raw",
        }
    }

    /// Outputs attached to this cell (empty for non-code cells)
    #[must_use]
    pub fn outputs(&self) -> &[CellOutput] {
        match self {
            Self::Code { outputs, .. } => outputs,
            _ => &[],
        }
    }
}

/// A captured output of a code cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellOutput {
    /// Stream output or a text/plain representation
    Text(String),
    /// Image payload to be extracted as an asset
    Image {
        /// Image encoding
        format: ImageFormat,
        /// Base64 payload, or literal markup for SVG
        data: String,
    },
    /// Error traceback
    Error {
        /// Exception name
        ename: String,
        /// Exception message
        evalue: String,
        /// Traceback lines
        traceback: Vec<String>,
    },
    /// A media bundle with no representation this tool understands.
    /// The exporter refuses to render these.
    Unsupported,
}

/// Image output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG, base64-encoded
    Png,
    /// JPEG, base64-encoded
    Jpeg,
    /// SVG, literal XML text
    Svg,
}

impl ImageFormat {
    /// File extension for extracted assets
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg",
        }
    }

    /// Whether the payload is base64-encoded (SVG is literal text)
    #[must_use]
    pub const fn is_base64(self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// Load a Jupyter Notebook from a file path.
///
/// # Errors
///
/// Returns [`NotebookError::NotFound`] if the path does not exist,
/// [`NotebookError::Io`] for other read failures, and
/// [`NotebookError::Parse`] / [`NotebookError::InvalidFormat`] if the
/// content is not a well-formed nbformat 4 document.
pub fn load_notebook<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(NotebookError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    parse_notebook(&content)
}

/// Parse a Jupyter Notebook from a string.
///
/// # Errors
///
/// Returns an error if the notebook JSON is malformed or not nbformat 4.
pub fn parse_notebook(content: &str) -> Result<Notebook> {
    let raw: RawNotebook = serde_json::from_str(content)?;

    if raw.nbformat != 4 {
        return Err(NotebookError::InvalidFormat(format!(
            "unsupported nbformat version {}",
            raw.nbformat
        )));
    }

    Ok(Notebook {
        metadata: extract_metadata(&raw),
        cells: extract_cells(&raw),
    })
}

/// Extract notebook metadata
fn extract_metadata(notebook: &RawNotebook) -> NotebookMetadata {
    let kernel_name = notebook
        .metadata
        .kernelspec
        .as_ref()
        .map(|ks| ks.name.clone());

    let language_name = notebook
        .metadata
        .language_info
        .as_ref()
        .map(|li| li.name.clone());

    let authors = notebook
        .metadata
        .authors
        .as_ref()
        .map(|authors| authors.iter().map(|a| a.name.clone()).collect())
        .unwrap_or_default();

    let title = notebook
        .metadata
        .additional
        .get("title")
        .and_then(|v| v.as_str())
        .map(String::from);

    NotebookMetadata {
        kernel_name,
        language_name,
        authors,
        title,
    }
}

/// Extract cells from the raw notebook, preserving order
fn extract_cells(notebook: &RawNotebook) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(notebook.cells.len());

    for cell in &notebook.cells {
        match cell {
            RawCell::Code {
                source,
                execution_count,
                outputs,
                ..
            } => {
                cells.push(Cell::Code {
                    source: source.join(""),
                    execution_count: *execution_count,
                    outputs: extract_outputs(outputs),
                });
            }
            RawCell::Markdown { source, .. } => {
                cells.push(Cell::Markdown {
                    source: source.join(""),
                });
            }
            RawCell::Raw { source, .. } => {
                cells.push(Cell::Raw {
                    source: source.join(""),
                });
            }
        }
    }

    cells
}

/// Extract outputs from a code cell, preserving execution order
fn extract_outputs(outputs: &[RawOutput]) -> Vec<CellOutput> {
    let mut result = Vec::new();

    for output in outputs {
        match output {
            RawOutput::Stream { text, .. } => {
                result.push(CellOutput::Text(text.0.clone()));
            }
            RawOutput::DisplayData(display_data) => {
                if let Some(out) = richest_representation(&display_data.data.content) {
                    result.push(out);
                }
            }
            RawOutput::ExecuteResult(execute_result) => {
                if let Some(out) = richest_representation(&execute_result.data.content) {
                    result.push(out);
                }
            }
            RawOutput::Error(error_output) => {
                result.push(CellOutput::Error {
                    ename: error_output.ename.clone(),
                    evalue: error_output.evalue.clone(),
                    traceback: error_output.traceback.clone(),
                });
            }
        }
    }

    result
}

/// Pick the richest representation from a media bundle: images win over
/// text/plain. Empty bundles produce no output; bundles with only
/// representations this tool cannot render become [`CellOutput::Unsupported`].
fn richest_representation(content: &[MediaType]) -> Option<CellOutput> {
    for media_type in content {
        match media_type {
            MediaType::Png(data) => {
                return Some(CellOutput::Image {
                    format: ImageFormat::Png,
                    data: data.clone(),
                })
            }
            MediaType::Jpeg(data) => {
                return Some(CellOutput::Image {
                    format: ImageFormat::Jpeg,
                    data: data.clone(),
                })
            }
            MediaType::Svg(data) => {
                return Some(CellOutput::Image {
                    format: ImageFormat::Svg,
                    data: data.clone(),
                })
            }
            _ => {}
        }
    }

    for media_type in content {
        if let MediaType::Plain(s) = media_type {
            return Some(CellOutput::Text(s.clone()));
        }
    }

    if content.is_empty() {
        None
    } else {
        Some(CellOutput::Unsupported)
    }
}
