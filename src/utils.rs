//! Utility functions for logging previews, JSON error classification and
//! artifact writes.
//!
//! This module provides helper functions used throughout the application:
//! - String truncation for log and error previews
//! - JSON error detection for truncated response bodies
//! - All-or-nothing file replacement for output artifacts

use crate::error::{PipelineError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::{fs, task};
use tracing::{debug, info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary) with
/// an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Detect if a serde_json error indicates truncated/incomplete JSON.
pub fn looks_truncated(e: &serde_json::Error) -> bool {
    use serde_json::error::Category;
    matches!(e.classify(), Category::Eof)
}

/// Write `contents` to a uniquely named temporary file in `dir` and rename it
/// over `target`. The temporary file is removed on any failure.
fn persist_staged(dir: &Path, target: &Path, contents: &[u8]) -> Result<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(".staging-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| PipelineError::io(dir, e))?;
    debug!(staging = %staged.path().display(), "Writing staging file");
    staged
        .write_all(contents)
        .map_err(|e| PipelineError::io(staged.path(), e))?;
    staged
        .persist(target)
        .map_err(|e| PipelineError::io(target, e.error))?;
    Ok(())
}

/// Replace the file at `path` with `contents`.
///
/// Missing parent directories are created. The contents are written to a
/// uniquely named temporary sibling first and renamed over the target, so
/// readers see either the previous file or the complete new one, and
/// concurrent writers never share a staging file. Any prior content is
/// discarded.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] naming the path that could not be created
/// or written.
#[instrument(level = "info", skip_all, fields(path = %path.display(), bytes = contents.len()))]
pub async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| PipelineError::io(&dir, e))?;

    let target = path.to_path_buf();
    let contents = contents.to_vec();
    task::spawn_blocking(move || persist_staged(&dir, &target, &contents))
        .await
        .map_err(|e| PipelineError::io(path, std::io::Error::other(e)))??;

    info!("Wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        let result = truncate_for_log("ééé", 3);
        assert_eq!(result, "é…(+4 bytes)");
    }

    #[test]
    fn test_looks_truncated() {
        let json_eof = r#"{"field": "value"#;
        let err = serde_json::from_str::<serde_json::Value>(json_eof).unwrap_err();
        assert!(looks_truncated(&err));

        let json_bad = r#"{"field": nope}"#;
        let err = serde_json::from_str::<serde_json::Value>(json_bad).unwrap_err();
        assert!(!looks_truncated(&err));
    }

    #[tokio::test]
    async fn test_write_atomic_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.json");

        write_atomic(&path, b"first version, longer").await.unwrap();
        write_atomic(&path, b"[]").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("out.json")]);
    }

    #[tokio::test]
    async fn test_write_atomic_concurrent_writers_same_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.md");
        let first = vec![b'a'; 64 * 1024];
        let second = vec![b'b'; 64 * 1024];

        let (a, b) = tokio::join!(write_atomic(&path, &first), write_atomic(&path, &second));
        a.unwrap();
        b.unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written == first || written == second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_atomic_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic(&blocker.join("out.json"), b"[]").await.unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
