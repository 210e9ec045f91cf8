//! Core data model for the ledger.
//!
//! A [`Record`] is one expense entry. Records are independent rows — there
//! are no relationships between them; everything aggregate (per-category
//! sums, date-range totals) is a derived view computed in [`stats`].

mod record;
pub mod stats;

pub use record::{NewRecord, Record, ValidationError};
