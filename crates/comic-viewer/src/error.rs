//! Error types for the viewer core.

use std::path::PathBuf;

use comic_store::StoreError;
use thiserror::Error;

/// Errors surfaced by viewer sessions.
///
/// None of these are fatal to a session: store failures leave the favorite
/// state where it was before the call, and the caller may retry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ViewerError {
    /// The content store failed; the session state was kept or rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Auto-advance needs a Tokio runtime to drive its timer.
    #[error("auto-advance requires a running Tokio runtime")]
    NoRuntime,

    /// Configuration file I/O error.
    #[error("failed to {operation} config file: {path}")]
    ConfigIo {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::ViewerConfig`].
    #[error("invalid config file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ViewerError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(err) => err.user_message(),
            Self::NoRuntime => "Auto-play is unavailable right now.".to_string(),
            Self::ConfigIo { path, .. } | Self::ConfigParse { path, .. } => {
                format!("Could not read viewer settings from {}", path.display())
            }
            Self::InvalidConfig(reason) => format!("Viewer settings are invalid: {reason}"),
        }
    }

    /// Whether retrying the same operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, ViewerError>;
