//! Error types shared by both pipelines.
//!
//! Every failure aborts the run it occurs in. The three variants mirror the
//! three places a run can go wrong: the releases fetch, the shape of the raw
//! search entries, and the filesystem.

use std::path::PathBuf;

/// Top-level error type for the changelog and search-index pipelines.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The releases endpoint was unreachable, answered with a non-success
    /// status, or returned a body that could not be decoded.
    #[error("network error: {0}")]
    Network(String),

    /// A raw search entry is missing a required field or holds an empty one.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Reading an input or writing an output artifact failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Create a network error from any displayable message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with the path it happened at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
