//! Composite → numbered snippet files.
//!
//! Segments the composite document at the boundary separator and writes one
//! `{prefix}{n}.rst` file per non-empty segment. Numbering is dense: an
//! empty segment is skipped and does not advance the counter. Segments are
//! written exactly as extracted, so rejoining the snippet files with the
//! separator reproduces the composite byte-for-byte.

use crate::error::WriteError;
use crate::export::BOUNDARY_SEPARATOR;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of splitting a composite file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Snippet files written, in numbering order
    pub snippets: Vec<PathBuf>,
    /// Whether the composite file was retained on disk
    pub composite_kept: bool,
}

/// Segment a composite document at the boundary separator.
///
/// Returns the raw segments, including empty ones; an empty composite has
/// no segments. Rejoining the result with [`BOUNDARY_SEPARATOR`] yields the
/// input unchanged.
#[must_use]
pub fn split_document(composite: &str) -> Vec<&str> {
    if composite.is_empty() {
        return Vec::new();
    }
    composite.split(BOUNDARY_SEPARATOR).collect()
}

/// Split a composite file into numbered snippet files beside it.
///
/// Snippets are named `{prefix}{n}.rst` with `n` starting at 1 and dense
/// over non-empty segments. When `keep` is false the composite file is
/// removed after a fully successful split.
///
/// Snippet files already written before a failure are left on disk; there
/// is no rollback.
///
/// # Errors
///
/// Returns [`WriteError::ReadComposite`] if the composite cannot be read,
/// [`WriteError::Snippet`] if a snippet cannot be written, and
/// [`WriteError::Cleanup`] if removing the composite fails.
pub fn split_file(composite_path: &Path, prefix: &str, keep: bool) -> Result<SplitReport, WriteError> {
    let text = fs::read_to_string(composite_path).map_err(|source| WriteError::ReadComposite {
        path: composite_path.to_path_buf(),
        source,
    })?;

    let dir = composite_path.parent().unwrap_or_else(|| Path::new(""));
    let mut snippets = Vec::new();

    for segment in split_document(&text) {
        if segment.trim().is_empty() {
            continue;
        }
        let path = dir.join(format!("{prefix}{}.rst", snippets.len() + 1));
        fs::write(&path, segment).map_err(|source| WriteError::Snippet {
            path: path.clone(),
            source,
        })?;
        snippets.push(path);
    }

    if !keep {
        fs::remove_file(composite_path).map_err(|source| WriteError::Cleanup {
            path: composite_path.to_path_buf(),
            source,
        })?;
    }

    log::debug!(
        "split {} into {} snippet(s), composite {}",
        composite_path.display(),
        snippets.len(),
        if keep { "kept" } else { "removed" }
    );

    Ok(SplitReport {
        snippets,
        composite_kept: keep,
    })
}
