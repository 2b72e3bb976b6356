//! Data models for releases and search-index records.
//!
//! This module defines the core data structures used by both pipelines:
//! - [`ReleaseRecord`]: one published release, as rendered into the changelog
//! - [`RawIndexEntry`]: a search entry as found in the pre-built input file
//! - [`OutputIndexEntry`]: the strictly-shaped record the search index expects
//!
//! The output records use the camelCase and underscore-prefixed key names of
//! the DocSearch result schema, hence the `#[serde(rename)]` attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single published release.
///
/// Built from the releases API response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    /// Display name of the release (falls back to the tag name).
    pub name: String,
    /// When the release was published.
    pub published_at: DateTime<Utc>,
    /// Release notes in markdown, copied verbatim into the changelog.
    pub body: String,
}

/// A search entry as read from the raw index file.
///
/// Only `url`, `lvl0` and `lvl1` are interpreted. Any other keys are kept in
/// [`RawIndexEntry::extra`] and carried through to the output record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawIndexEntry {
    /// Site-relative url, optionally carrying one `#` anchor marker.
    pub url: String,
    /// Top-level category (page section).
    pub lvl0: String,
    /// Entry title. Must be non-empty.
    pub lvl1: String,
    /// Unrecognized keys, preserved as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which hierarchy level a record represents.
///
/// The normalizer only ever produces leaf entries, so this has one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Lvl1,
}

/// Strength of a (here synthetic) text match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    None,
    Full,
}

/// The `hierarchy` block: lvl0 and lvl1 populated, deeper levels always null.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Hierarchy {
    pub lvl0: String,
    pub lvl1: String,
    pub lvl2: Option<String>,
    pub lvl3: Option<String>,
    pub lvl4: Option<String>,
    pub lvl5: Option<String>,
    pub lvl6: Option<String>,
}

/// Snippet metadata for one hierarchy level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnippetValue {
    pub value: String,
    #[serde(rename = "matchLevel")]
    pub match_level: MatchLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnippetHierarchy {
    pub lvl1: SnippetValue,
}

/// The `_snippetResult` block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SnippetResult {
    pub hierarchy: SnippetHierarchy,
}

/// Highlight metadata for one hierarchy level.
///
/// `fullyHighlighted` is only present on levels that report a match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HighlightValue {
    pub value: String,
    #[serde(rename = "matchLevel")]
    pub match_level: MatchLevel,
    #[serde(
        rename = "fullyHighlighted",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fully_highlighted: Option<bool>,
    #[serde(rename = "matchedWords")]
    pub matched_words: Vec<String>,
}

/// Per-level highlight metadata for lvl0 and lvl1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HighlightHierarchy {
    pub lvl0: HighlightValue,
    pub lvl1: HighlightValue,
}

/// The `_highlightResult` block.
///
/// `hierarchy_camel` holds exactly one owned copy of `hierarchy`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HighlightResult {
    pub hierarchy: HighlightHierarchy,
    pub hierarchy_camel: Vec<HighlightHierarchy>,
}

/// A normalized search-index record, one per [`RawIndexEntry`].
///
/// # JSON Shape
///
/// ```text
/// { url, lvl0, lvl1, <extra>, hierarchy, type,
///   _snippetResult, _highlightResult }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputIndexEntry {
    /// Absolute url after anchor rewriting.
    pub url: String,
    pub lvl0: String,
    pub lvl1: String,
    /// Raw keys carried through from the input entry.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub hierarchy: Hierarchy,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(rename = "_snippetResult")]
    pub snippet_result: SnippetResult,
    #[serde(rename = "_highlightResult")]
    pub highlight_result: HighlightResult,
}
