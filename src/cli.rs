//! Command-line interface definitions for docsite_artifacts.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All options can be provided via command-line flags or environment variables,
//! and every one of them has a default matching the documentation site layout.

use crate::outputs::changelog::{DateFormat, DEFAULT_DATE_FORMAT};
use crate::sources::releases::DEFAULT_RELEASES_URL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// Base url prepended to every rewritten search entry url.
pub const DEFAULT_BASE_URL: &str = "https://rest-data-validator.netlify.app/guide";

/// Command-line arguments for docsite_artifacts.
///
/// # Examples
///
/// ```sh
/// # Regenerate the changelog page
/// docsite_artifacts changelog --changelog-output docs/resources/changelog.md
///
/// # Normalize the crawler export for the search index
/// docsite_artifacts search-index --index-input algolia.json --index-output convertedData.json
///
/// # Both pipelines, concurrently
/// docsite_artifacts all
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Which pipeline(s) to run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the release history and render the changelog page
    Changelog(ChangelogArgs),
    /// Normalize raw search entries into the search-index dataset
    SearchIndex(SearchIndexArgs),
    /// Run both pipelines concurrently
    All {
        #[command(flatten)]
        changelog: ChangelogArgs,
        #[command(flatten)]
        search_index: SearchIndexArgs,
    },
}

/// Options for the changelog pipeline.
#[derive(Args, Debug, Clone)]
pub struct ChangelogArgs {
    /// Releases listing endpoint
    #[arg(long, env = "RELEASES_URL", default_value = DEFAULT_RELEASES_URL)]
    pub releases_url: Url,

    /// Path of the rendered changelog markdown
    #[arg(long, env = "CHANGELOG_OUTPUT", default_value = "docs/resources/changelog.md")]
    pub changelog_output: PathBuf,

    /// strftime pattern for release dates (rendered in UTC)
    #[arg(long, env = "CHANGELOG_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT, value_parser = parse_date_format)]
    pub date_format: DateFormat,

    /// Sort releases by publication date, newest first, instead of trusting API order
    #[arg(long)]
    pub sort_newest_first: bool,
}

/// Options for the search-index pipeline.
#[derive(Args, Debug, Clone)]
pub struct SearchIndexArgs {
    /// Raw search entries exported by the crawler
    #[arg(long, env = "SEARCH_INDEX_INPUT", default_value = "algolia.json")]
    pub index_input: PathBuf,

    /// Path of the normalized search-index dataset
    #[arg(long, env = "SEARCH_INDEX_OUTPUT", default_value = "convertedData.json")]
    pub index_output: PathBuf,

    /// Absolute url prepended to every entry url
    #[arg(long, env = "SEARCH_BASE_URL", default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,
}

fn parse_date_format(s: &str) -> Result<DateFormat, String> {
    DateFormat::new(s)
}

/// Accept only absolute urls, but keep the caller's exact spelling since it
/// is used as a plain string prefix.
fn parse_base_url(s: &str) -> Result<String, String> {
    Url::parse(s).map_err(|e| format!("invalid base url {:?}: {}", s, e))?;
    Ok(s.to_string())
}
