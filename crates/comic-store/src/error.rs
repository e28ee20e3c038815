//! Content store error types.
//!
//! Store operations return structured errors that carry a user-facing
//! message, an optional remediation hint, and whether a retry may help.

use std::path::PathBuf;

use comic_model::{ComicId, ModelError};
use thiserror::Error;

/// Content store operation error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// No comic with the requested id exists.
    #[error("comic not found: {id}")]
    NotFound { id: ComicId },

    /// The backend could not be reached or answered with a transient failure.
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    /// The request did not complete in time; its outcome is unknown.
    #[error("content store request timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The backend refused the request.
    #[error("content store rejected the request: {0}")]
    Rejected(String),

    /// Catalog file I/O error.
    #[error("failed to {operation} catalog file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file could not be parsed.
    #[error("invalid catalog file: {path}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record failed validation.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ModelError),
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { .. } => {
                "The comic you're looking for doesn't exist or has been removed.".to_string()
            }
            Self::Unavailable(_) | Self::Timeout { .. } => {
                "Could not reach the comic library. Please check your connection.".to_string()
            }
            Self::Rejected(reason) => format!("The request was not accepted: {reason}"),
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the catalog at {}", operation, path.display()),
            Self::Catalog { path, .. } => {
                format!("The catalog at {} is not valid JSON.", path.display())
            }
            Self::InvalidRecord(_) => "A comic record is malformed.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => Some("Browse the library to find another comic.".into()),
            Self::Unavailable(_) | Self::Timeout { .. } => Some("Try again.".into()),
            Self::Rejected(_) => None,
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::Catalog { .. } | Self::InvalidRecord(_) => {
                Some("Fix the catalog entry and reload.".into())
            }
        }
    }

    /// Whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}

/// Result type alias for content store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
