//! Notebook → composite reStructuredText rendering.
//!
//! Each cell becomes one boundary-delimited section: markdown and raw cells
//! pass through as body text, code cells become `.. code::` directives with
//! their outputs rendered directly beneath the source. The boundary token
//! between sections is the contract the splitter relies on.

use crate::error::ExportError;
use base64::Engine as _;
use nbcell_notebook::{Cell, CellOutput, ImageFormat, Notebook};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Boundary marker between rendered cells. An rST comment, so it is
/// invisible to renderers if the composite is kept.
pub const BOUNDARY_TOKEN: &str = ".. <<nbcell-boundary>>";

/// Separator as it appears in the composite: the token on its own line,
/// padded by blank lines so it never merges with adjacent blocks.
pub const BOUNDARY_SEPARATOR: &str = "\n.. <<nbcell-boundary>>\n\n";

/// ANSI escape sequences as emitted by IPython tracebacks and rich output.
static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("ANSI escape regex is valid"));

/// The rendered composite document: one text blob plus the image assets
/// referenced by its `.. image::` directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeDocument {
    /// Concatenated rST rendering of all cells, in cell order
    pub text: String,
    /// Extracted image assets, in order of appearance
    pub assets: Vec<ImageAsset>,
}

/// A decoded image output destined for a file next to the snippets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    /// Asset filename referenced by the `.. image::` directive
    pub filename: String,
    /// Decoded file content
    pub bytes: Vec<u8>,
}

/// Render a notebook into a composite rST document.
///
/// The result contains exactly one boundary-delimited section per cell, in
/// cell order.
///
/// # Errors
///
/// Returns [`ExportError::UnsupportedOutput`] for output shapes the
/// exporter does not understand, [`ExportError::InvalidImage`] for
/// undecodable image payloads, and [`ExportError::BoundaryCollision`] if a
/// cell's rendered content contains the boundary token itself.
pub fn export_notebook(notebook: &Notebook) -> Result<CompositeDocument, ExportError> {
    let language = notebook.metadata.code_language();
    let mut sections = Vec::with_capacity(notebook.cells.len());
    let mut assets = Vec::new();

    for (index, cell) in notebook.cells.iter().enumerate() {
        let section = render_cell(cell, index, language, &mut assets)?;
        if section.contains(BOUNDARY_TOKEN) {
            return Err(ExportError::BoundaryCollision { cell: index });
        }
        sections.push(section);
    }

    let text = sections.join(BOUNDARY_SEPARATOR);
    log::debug!(
        "exported {} cell(s) into a {}-byte composite with {} asset(s)",
        notebook.cells.len(),
        text.len(),
        assets.len()
    );

    Ok(CompositeDocument { text, assets })
}

/// Render one cell as a boundary-free rST section
fn render_cell(
    cell: &Cell,
    index: usize,
    language: &str,
    assets: &mut Vec<ImageAsset>,
) -> Result<String, ExportError> {
    match cell {
        // Markdown and raw cells pass through as body text.
        Cell::Markdown { source } | Cell::Raw { source } => Ok(with_trailing_newline(source)),
        Cell::Code {
            source, outputs, ..
        } => {
            let mut section = String::new();
            let _ = writeln!(section, ".. code:: {language}");
            section.push('\n');
            section.push_str(&indent(source, 4));

            for (output_index, output) in outputs.iter().enumerate() {
                section.push('\n');
                match output {
                    CellOutput::Text(text) => {
                        section.push_str(".. parsed-literal::\n\n");
                        section.push_str(&indent(&strip_ansi(text), 4));
                    }
                    CellOutput::Image { format, data } => {
                        let filename =
                            format!("output_{index}_{output_index}.{}", format.extension());
                        let bytes = decode_image(*format, data, index, output_index)?;
                        let _ = writeln!(section, ".. image:: {filename}");
                        assets.push(ImageAsset { filename, bytes });
                    }
                    CellOutput::Error {
                        ename,
                        evalue,
                        traceback,
                    } => {
                        section.push_str(".. parsed-literal::\n    :class: error\n\n");
                        let text = if traceback.is_empty() {
                            format!("{ename}: {evalue}")
                        } else {
                            traceback.join("\n")
                        };
                        section.push_str(&indent(&strip_ansi(&text), 4));
                    }
                    CellOutput::Unsupported => {
                        return Err(ExportError::UnsupportedOutput {
                            cell: index,
                            output: output_index,
                        })
                    }
                }
            }

            Ok(section)
        }
    }
}

/// Decode an image payload to file bytes. SVG payloads are literal markup;
/// everything else is base64, possibly with embedded line breaks.
fn decode_image(
    format: ImageFormat,
    data: &str,
    cell: usize,
    output: usize,
) -> Result<Vec<u8>, ExportError> {
    if format.is_base64() {
        let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|source| ExportError::InvalidImage {
                cell,
                output,
                source,
            })
    } else {
        Ok(data.as_bytes().to_vec())
    }
}

/// Strip ANSI escape sequences from captured output text
fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Indent every non-empty line by `spaces` spaces, normalizing the result
/// to end with a newline
fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::with_capacity(text.len() + 64);
    for line in text.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn with_trailing_newline(source: &str) -> String {
    if source.is_empty() || source.ends_with('\n') {
        source.to_string()
    } else {
        format!("{source}\n")
    }
}
