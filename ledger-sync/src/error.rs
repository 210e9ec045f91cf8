//! Sync error types.

use ledger_cloud::MirrorError;
use ledger_storage::StorageError;
use ledger_types::ValidationError;
use thiserror::Error;

/// Result type for orchestrator operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors returned by the orchestrator's public contract.
///
/// Push failures after a committed local mutation are deliberately NOT part
/// of this type — they are reported on the status channel only, because the
/// local mutation already succeeded.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),
}
