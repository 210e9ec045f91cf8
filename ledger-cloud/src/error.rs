//! Remote mirror error types.

use thiserror::Error;

/// Result type for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Errors that can occur talking to the remote mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Network or server failure reaching the remote store. Local state is
    /// unaffected; the remote is considered stale until the next successful
    /// sync.
    #[error("remote unavailable: {0}")]
    RemoteUnavailable(String),

    /// The remote document content could not be parsed. A sync failure, not
    /// a data-loss event — local data is untouched.
    #[error("remote document malformed: {0}")]
    Format(String),

    #[error("authentication required")]
    AuthRequired,

    #[error("authorization failed: {0}")]
    AuthFailed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for MirrorError {
    fn from(err: reqwest::Error) -> Self {
        MirrorError::RemoteUnavailable(err.to_string())
    }
}
