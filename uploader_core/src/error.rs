//! Uploader error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploaderError>;

/// Failures of the uploader core.
///
/// A rejected batch is not an error: it is reported as
/// [`BatchOutcome::Rejected`](crate::files::BatchOutcome::Rejected).
#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("Native file input is detached; working set of {entries} entries was not mirrored")]
    InputDetached { entries: usize },

    #[error("Uploader is not mounted")]
    NotMounted,

    #[error("Invalid accept range: {0}")]
    InvalidAcceptRange(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl UploaderError {
    /// True for failures that leave the native payload out of step with the
    /// working set until the next successful sync.
    pub fn is_sync_failure(&self) -> bool {
        matches!(self, UploaderError::InputDetached { .. })
    }
}
