//! Raw search-entry file loader.
//!
//! The input is a JSON array of objects with at least `url`, `lvl0` and
//! `lvl1` string fields, as exported by the site's search crawler. The
//! entries are handed to [`crate::normalize`] as an explicit parameter.

use crate::error::{PipelineError, Result};
use crate::models::RawIndexEntry;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Read and decode every raw entry from `path`.
///
/// # Errors
///
/// - [`PipelineError::Io`] if the file cannot be read
/// - [`PipelineError::Schema`] if the content is not UTF-8 text holding an
///   array of entries with string `url`, `lvl0` and `lvl1` fields
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn read_index_entries(path: &Path) -> Result<Vec<RawIndexEntry>> {
    let text = fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::InvalidData => {
            PipelineError::schema(format!("{}: not valid UTF-8 text", path.display()))
        }
        _ => PipelineError::io(path, e),
    })?;

    let entries = parse_index_entries(&text)
        .map_err(|e| PipelineError::schema(format!("{}: {}", path.display(), e)))?;

    info!(count = entries.len(), "Loaded raw search entries");
    Ok(entries)
}

/// Decode raw entries from JSON text.
pub fn parse_index_entries(text: &str) -> std::result::Result<Vec<RawIndexEntry>, serde_json::Error> {
    serde_json::from_str(text)
}
