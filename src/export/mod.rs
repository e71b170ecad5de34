//! Exporters: package a captured render as a downloadable artifact.
//!
//! Both entry points read the live render surface through the session,
//! so the artifact always reflects the latest edits, and neither
//! mutates the quote. When no surface is mounted they return `Ok(None)`
//! instead of failing; absence of a capturable surface is not an error.

pub mod png;

#[cfg(feature = "pdf")]
pub mod pdf;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Artifacts are named after the quote identifier: `<quote_id>.<ext>`.
/// Identifiers with path separators would escape the output directory,
/// so they are rejected.
pub(crate) fn artifact_path(dir: &Path, quote_id: &str, ext: &str) -> Result<PathBuf> {
    if quote_id.contains(['/', '\\']) {
        return Err(Error::Export(format!(
            "quote id {:?} must not contain path separators",
            quote_id
        )));
    }
    Ok(dir.join(format!("{}.{}", quote_id, ext)))
}
