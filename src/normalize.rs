//! Search-entry normalization.
//!
//! Maps a [`RawIndexEntry`] onto the [`OutputIndexEntry`] shape expected by
//! the DocSearch frontend. The mapping is a pure function of one entry and
//! the base url: entries never influence each other and the output sequence
//! has the same length and order as the input.
//!
//! # Derivation Rules
//!
//! | Output field | Source |
//! |--------------|--------|
//! | `url` | `base_url` + entry url with its first `#` replaced by `/` |
//! | `hierarchy.lvl0/lvl1` | entry `lvl0`/`lvl1` |
//! | `hierarchy.lvl2..lvl6` | always `null` |
//! | `type` | always `"lvl1"` |
//! | lvl0 highlight | `matchLevel: "none"`, no matched words |
//! | lvl1 highlight | `matchLevel: "full"`, matched word is the lowercased first character |
//!
//! The highlight metadata is synthesized, not computed against a query.

use crate::error::{PipelineError, Result};
use crate::models::{
    Hierarchy, HighlightHierarchy, HighlightResult, HighlightValue, MatchLevel, OutputIndexEntry,
    RawIndexEntry, RecordType, SnippetHierarchy, SnippetResult, SnippetValue,
};
use tracing::{debug, info, instrument};

/// Keys the normalizer defines itself. Raw entries carrying them lose them.
const RESERVED_KEYS: [&str; 5] = [
    "url",
    "hierarchy",
    "type",
    "_snippetResult",
    "_highlightResult",
];

/// Rewrite a site-relative url into an absolute one.
///
/// Only the first `#` is replaced, so `"/a#b#c"` becomes `"/a/b#c"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(rewrite_url("/intro#setup", "https://site/guide"), "https://site/guide/intro/setup");
/// assert_eq!(rewrite_url("/intro", "https://site/guide"), "https://site/guide/intro");
/// ```
pub fn rewrite_url(url: &str, base_url: &str) -> String {
    format!("{}{}", base_url, url.replacen('#', "/", 1))
}

/// Normalize a single raw entry.
///
/// # Errors
///
/// Returns [`PipelineError::Schema`] if `entry.lvl1` is empty, since the
/// matched-word token is derived from its first character.
pub fn normalize(entry: &RawIndexEntry, base_url: &str) -> Result<OutputIndexEntry> {
    let first = entry.lvl1.chars().next().ok_or_else(|| {
        PipelineError::schema(format!("entry with url {:?} has an empty lvl1", entry.url))
    })?;
    let token: String = first.to_lowercase().collect();

    let highlight = HighlightHierarchy {
        lvl0: HighlightValue {
            value: entry.lvl0.clone(),
            match_level: MatchLevel::None,
            fully_highlighted: None,
            matched_words: Vec::new(),
        },
        lvl1: HighlightValue {
            value: entry.lvl1.clone(),
            match_level: MatchLevel::Full,
            fully_highlighted: Some(false),
            matched_words: vec![token],
        },
    };

    // Filtered rather than removed in place so carried keys keep input order.
    let extra = entry
        .extra
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(OutputIndexEntry {
        url: rewrite_url(&entry.url, base_url),
        lvl0: entry.lvl0.clone(),
        lvl1: entry.lvl1.clone(),
        extra,
        hierarchy: Hierarchy {
            lvl0: entry.lvl0.clone(),
            lvl1: entry.lvl1.clone(),
            lvl2: None,
            lvl3: None,
            lvl4: None,
            lvl5: None,
            lvl6: None,
        },
        record_type: RecordType::Lvl1,
        snippet_result: SnippetResult {
            hierarchy: SnippetHierarchy {
                lvl1: SnippetValue {
                    value: entry.lvl1.clone(),
                    match_level: MatchLevel::Full,
                },
            },
        },
        highlight_result: HighlightResult {
            hierarchy_camel: vec![highlight.clone()],
            hierarchy: highlight,
        },
    })
}

/// Normalize every entry, preserving order.
///
/// Stops at the first invalid entry; nothing is returned for a partially
/// valid input.
#[instrument(level = "info", skip_all, fields(count = entries.len(), %base_url))]
pub fn normalize_all(entries: &[RawIndexEntry], base_url: &str) -> Result<Vec<OutputIndexEntry>> {
    let normalized = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            debug!(index = i, url = %entry.url, "Normalizing entry");
            normalize(entry, base_url).map_err(|e| match e {
                PipelineError::Schema { message } => {
                    PipelineError::schema(format!("entry {}: {}", i, message))
                }
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = normalized.len(), "Normalized search entries");
    Ok(normalized)
}
