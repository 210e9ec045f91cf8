//! SQLite storage layer for the ledger.
//!
//! A single `records` table holds every expense entry, identity-keyed with an
//! auto-assigned monotonic id and a non-unique secondary index on `date` for
//! ordered listing. The schema is versioned by SQLite's `user_version`
//! integer; migrations run inside the open path.
//!
//! Every operation is transactional: it either fully commits or leaves the
//! store unchanged.

mod error;
mod ledger_store;

pub use error::{StorageError, StorageResult};
pub use ledger_store::LedgerStore;
