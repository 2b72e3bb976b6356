//! # docsite_artifacts
//!
//! Generates the two derived artifacts of the documentation site:
//! the changelog page, rendered from the project's GitHub releases, and the
//! search-index dataset, normalized from the crawler's raw entry export.
//!
//! ## Usage
//!
//! ```sh
//! docsite_artifacts changelog
//! docsite_artifacts search-index --index-input algolia.json
//! docsite_artifacts all
//! ```
//!
//! ## Architecture
//!
//! Two independent pipelines, each fully regenerating its artifact:
//! 1. **Changelog**: releases API → markdown renderer → `changelog.md`
//! 2. **Search index**: raw entry file → hierarchy normalizer → `convertedData.json`
//!
//! Any error aborts its run and the process exits non-zero.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod error;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use cli::{ChangelogArgs, Cli, Command, SearchIndexArgs};
use error::PipelineError;
use pipeline::{run_changelog, run_search_index, ChangelogOptions};
use sources::releases::GithubReleases;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("docsite_artifacts starting up");

    let args = Cli::parse();
    debug!(?args.command, "Parsed CLI arguments");

    let errors: Vec<PipelineError> = match args.command {
        Command::Changelog(changelog) => changelog_step(&changelog).await.err().into_iter().collect(),
        Command::SearchIndex(search_index) => {
            search_index_step(&search_index).await.err().into_iter().collect()
        }
        Command::All {
            changelog,
            search_index,
        } => {
            let (a, b) = tokio::join!(changelog_step(&changelog), search_index_step(&search_index));
            [a.err(), b.err()].into_iter().flatten().collect()
        }
    };

    let elapsed = start_time.elapsed();
    if errors.is_empty() {
        info!(?elapsed, "Execution complete");
        return ExitCode::SUCCESS;
    }

    info!(?elapsed, failed = errors.len(), "Run aborted");
    for e in &errors {
        eprintln!("error: {}", e);
    }
    ExitCode::FAILURE
}

#[instrument(level = "info", skip_all, fields(endpoint = %args.releases_url))]
async fn changelog_step(args: &ChangelogArgs) -> Result<(), PipelineError> {
    let source = GithubReleases::new(args.releases_url.clone());
    let options = ChangelogOptions {
        date_format: args.date_format.clone(),
        sort_newest_first: args.sort_newest_first,
    };
    info!(
        endpoint = %source.endpoint(),
        date_format = %options.date_format,
        sort_newest_first = options.sort_newest_first,
        "Starting changelog pipeline"
    );

    let count = run_changelog(&source, &args.changelog_output, &options).await?;
    info!(count, path = %args.changelog_output.display(), "Changelog written");
    Ok(())
}

#[instrument(level = "info", skip_all, fields(base_url = %args.base_url))]
async fn search_index_step(args: &SearchIndexArgs) -> Result<(), PipelineError> {
    let count = run_search_index(&args.index_input, &args.index_output, &args.base_url).await?;
    info!(count, path = %args.index_output.display(), "Search index written");
    Ok(())
}
