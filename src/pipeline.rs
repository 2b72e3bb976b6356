//! The two artifact pipelines.
//!
//! Each pipeline is a straight line of stages and aborts on the first error,
//! leaving its output artifact untouched:
//!
//! 1. **Changelog**: fetch releases → (optional sort) → render → write
//! 2. **Search index**: read raw entries → normalize → write
//!
//! The pipelines share no state and may run concurrently.

use crate::error::Result;
use crate::normalize::normalize_all;
use crate::outputs::changelog::{render_changelog, write_changelog, DateFormat};
use crate::outputs::search_index::write_index;
use crate::sources::releases::{sort_newest_first, ReleaseSource};
use crate::sources::search_entries::read_index_entries;
use std::path::Path;
use std::time::Instant;
use tracing::{info, instrument};

/// Settings for one changelog run.
#[derive(Debug, Clone, Default)]
pub struct ChangelogOptions {
    pub date_format: DateFormat,
    pub sort_newest_first: bool,
}

/// Fetch releases from `source` and write the rendered changelog to `output`.
///
/// Returns the number of releases rendered.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub async fn run_changelog<S: ReleaseSource>(
    source: &S,
    output: &Path,
    options: &ChangelogOptions,
) -> Result<usize> {
    let t0 = Instant::now();
    let mut releases = source.fetch_releases().await?;
    if options.sort_newest_first {
        sort_newest_first(&mut releases);
    }

    let markdown = render_changelog(&releases, &options.date_format);
    write_changelog(output, &markdown).await?;

    info!(
        releases = releases.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Changelog pipeline complete"
    );
    Ok(releases.len())
}

/// Normalize the raw entries at `input` and write the dataset to `output`.
///
/// Returns the number of entries written.
#[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub async fn run_search_index(input: &Path, output: &Path, base_url: &str) -> Result<usize> {
    let t0 = Instant::now();
    let raw = read_index_entries(input).await?;
    let normalized = normalize_all(&raw, base_url)?;
    write_index(output, &normalized).await?;

    info!(
        entries = normalized.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Search index pipeline complete"
    );
    Ok(normalized.len())
}
