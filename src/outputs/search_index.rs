//! Search-index dataset output.
//!
//! Serializes the normalized entries as a pretty-printed JSON array (two
//! space indent, no trailing newline). An empty sequence is written as the
//! literal `[]`. The file is replaced on every run; entries are never merged
//! with a previous dataset.

use crate::error::{PipelineError, Result};
use crate::models::OutputIndexEntry;
use crate::utils::write_atomic;
use std::path::Path;
use tracing::{info, instrument};

/// Serialize entries to the dataset's JSON text.
pub fn serialize_index(entries: &[OutputIndexEntry]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(entries)
}

/// Write the full normalized sequence to `path`.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the target location is not writable.
/// Serialization cannot fail for these types; if it ever did, it is reported
/// as an I/O error on `path` as well, since no artifact could be produced.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = entries.len()))]
pub async fn write_index(path: &Path, entries: &[OutputIndexEntry]) -> Result<()> {
    let json = serialize_index(entries).map_err(|e| PipelineError::io(path, e.into()))?;
    write_atomic(path, json.as_bytes()).await?;
    info!("Wrote search index");
    Ok(())
}
