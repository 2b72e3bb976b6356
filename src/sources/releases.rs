//! Releases API client.
//!
//! Fetches the release history that the changelog is rendered from. The
//! module is split the same way as the rest of the pipeline seams:
//! - [`ReleaseSource`]: trait the changelog pipeline is generic over
//! - [`GithubReleases`]: the GitHub Releases API implementation
//!
//! # Ordering
//!
//! The API returns releases newest-first and that order is kept verbatim.
//! [`is_newest_first`] checks the precondition at the fetch boundary and
//! [`sort_newest_first`] is available to callers who want to enforce it.
//!
//! One request is made per run. There is no retry, pagination or
//! authentication.

use crate::error::{PipelineError, Result};
use crate::models::ReleaseRecord;
use crate::utils::{looks_truncated, truncate_for_log};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default endpoint: the release listing of the documented library.
pub const DEFAULT_RELEASES_URL: &str =
    "https://api.github.com/repos/SeanLuis/rest-data-validator/releases";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Trait for anything that can produce the release history.
///
/// Implementors return releases newest-first.
pub trait ReleaseSource {
    /// Fetch the full release sequence.
    async fn fetch_releases(&self) -> Result<Vec<ReleaseRecord>>;
}

/// GitHub API response for a single release.
#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: Option<String>,
    name: Option<String>,
    body: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    draft: bool,
}

/// GitHub API error response.
#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

impl GitHubRelease {
    /// Convert into a [`ReleaseRecord`].
    ///
    /// Returns `Ok(None)` for drafts and unpublished releases, which have no
    /// date to render.
    fn into_record(self) -> Result<Option<ReleaseRecord>> {
        if self.draft {
            return Ok(None);
        }
        let Some(published_at) = self.published_at else {
            return Ok(None);
        };

        let published_at = DateTime::parse_from_rfc3339(&published_at)
            .map_err(|e| {
                PipelineError::network(format!(
                    "malformed releases response: bad published_at {:?}: {}",
                    published_at, e
                ))
            })?
            .with_timezone(&Utc);

        let name = match (self.name, self.tag_name) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(tag)) if !tag.is_empty() => tag,
            _ => {
                return Err(PipelineError::network(
                    "malformed releases response: release has neither name nor tag_name",
                ));
            }
        };

        Ok(Some(ReleaseRecord {
            name,
            published_at,
            body: self.body.unwrap_or_default(),
        }))
    }
}

/// [`ReleaseSource`] backed by the GitHub Releases API.
#[derive(Debug, Clone)]
pub struct GithubReleases {
    client: Client,
    endpoint: Url,
}

impl GithubReleases {
    /// Create a client for the given releases listing endpoint.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// The endpoint this client reads from.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ReleaseSource for GithubReleases {
    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint))]
    async fn fetch_releases(&self) -> Result<Vec<ReleaseRecord>> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<GitHubError>(&text) {
                Ok(gh_error) => gh_error.message,
                Err(_) => truncate_for_log(&text, 200),
            };
            return Err(PipelineError::network(format!(
                "releases API error ({}): {}",
                status, detail
            )));
        }

        let releases: Vec<GitHubRelease> = serde_json::from_str(&text).map_err(|e| {
            let hint = if looks_truncated(&e) { " (truncated body)" } else { "" };
            PipelineError::network(format!("malformed releases response{}: {}", hint, e))
        })?;
        let total = releases.len();

        let mut records = Vec::with_capacity(total);
        for release in releases {
            let tag = release.tag_name.clone().unwrap_or_default();
            match release.into_record()? {
                Some(record) => records.push(record),
                None => warn!(%tag, "Skipping unpublished release"),
            }
        }

        if !is_newest_first(&records) {
            warn!("Releases are not ordered newest-first; keeping API order");
        }

        let dt = t0.elapsed();
        info!(
            count = records.len(),
            skipped = total - records.len(),
            elapsed_ms = dt.as_millis() as u64,
            "Fetched releases"
        );
        debug!(names = ?records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(), "Release names");
        Ok(records)
    }
}

/// Whether `releases` is ordered by publication date, newest first.
///
/// Equal timestamps count as ordered.
pub fn is_newest_first(releases: &[ReleaseRecord]) -> bool {
    releases
        .windows(2)
        .all(|pair| pair[0].published_at >= pair[1].published_at)
}

/// Stable sort by publication date, newest first.
///
/// Releases sharing a timestamp keep their original relative order.
pub fn sort_newest_first(releases: &mut [ReleaseRecord]) {
    releases.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}
