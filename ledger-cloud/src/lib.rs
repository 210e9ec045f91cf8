//! Remote mirror client for the ledger.
//!
//! The remote side is a single JSON document in a Drive-style file store:
//! the entire record collection serialized as one artifact, living in a
//! private per-application namespace invisible to the user's general file
//! listing. The client supports exactly three operations — find-or-create
//! the document, read its full content, overwrite its full content — and
//! consumes a bearer credential supplied by an external [`AuthProvider`].

pub mod auth;
pub mod config;
pub mod error;
pub mod mirror_client;

pub use auth::{AuthProvider, StaticTokenProvider};
pub use config::MirrorConfig;
pub use error::{MirrorError, MirrorResult};
pub use mirror_client::{FileHandle, MirrorClient};
