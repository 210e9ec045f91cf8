//! Sync orchestrator for the ledger.
//!
//! The orchestrator is the "brain" that ties together:
//! - The local store (always the source of truth)
//! - The remote mirror client (best-effort whole-document mirror)
//! - Credential acquisition (an external collaborator behind a trait)
//!
//! Local mutations commit first and never roll back on sync failure; the
//! remote document is only ever overwritten with the full current dataset.
//! Failures surface on the status channel, not as crashes, and there is no
//! automatic retry — the next mutation or a re-sign-in retries naturally.

mod error;
mod orchestrator;
mod session;
mod status;

pub use error::{SyncError, SyncResult};
pub use orchestrator::SyncOrchestrator;
pub use session::SessionState;
pub use status::{Severity, StatusChannel, StatusUpdate};
