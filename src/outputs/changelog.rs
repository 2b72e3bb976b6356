//! Changelog rendering.
//!
//! Converts the release history into the markdown page served at
//! `/resources/changelog`.
//!
//! # Output Structure
//!
//! ```text
//! # Changelog
//!
//! ## v1.2.0 - 1/15/2024
//! <release body, verbatim>
//!
//! ## v1.1.0 - 12/2/2023
//! <release body, verbatim>
//!
//! ```
//!
//! Releases are emitted in the order given, with no dedupe or merge.

use crate::error::Result;
use crate::models::ReleaseRecord;
use crate::utils::write_atomic;
use chrono::format::{Item, StrftimeItems};
use std::fmt;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, instrument};

/// Title line every changelog starts with.
pub const CHANGELOG_TITLE: &str = "# Changelog";

/// `strftime` pattern producing en-US short dates, e.g. `1/15/2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A validated `strftime` pattern for release dates.
///
/// Construction rejects patterns chrono cannot format, so rendering never
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl DateFormat {
    /// Validate and wrap a `strftime` pattern.
    pub fn new(pattern: &str) -> std::result::Result<Self, String> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(format!("invalid date format {:?}", pattern));
        }
        Ok(Self(pattern.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self(DEFAULT_DATE_FORMAT.to_string())
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render releases into the changelog markdown document.
///
/// Each release contributes a `## {name} - {date}` heading, its body and a
/// blank line. Dates are formatted in UTC. An empty slice yields the title
/// alone.
pub fn render_changelog(releases: &[ReleaseRecord], date_format: &DateFormat) -> String {
    let mut md = format!("{}\n\n", CHANGELOG_TITLE);
    for release in releases {
        let date = release.published_at.format(date_format.as_str());
        // Writing into a String cannot fail and the pattern is pre-validated.
        let _ = write!(md, "## {} - {}\n{}\n\n", release.name, date, release.body);
    }
    md
}

/// Write rendered changelog markdown to `path`, replacing any prior file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_changelog(path: &Path, markdown: &str) -> Result<()> {
    write_atomic(path, markdown.as_bytes()).await?;
    info!(bytes = markdown.len(), "Wrote changelog");
    Ok(())
}
