//! Error types for loading story content.

use std::path::PathBuf;

use crate::validate::{ContentIssue, Severity};

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur while loading or indexing content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The content file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The content is not valid JSON or does not match the content shape.
    #[error("malformed content: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation found errors.
    #[error("invalid content: {} error(s)", count_errors(.0))]
    Invalid(Vec<ContentIssue>),

    /// There is no act, chapter, or scene to start from.
    #[error("content has no playable scene")]
    EmptyContent,
}

fn count_errors(issues: &[ContentIssue]) -> usize {
    issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count()
}
