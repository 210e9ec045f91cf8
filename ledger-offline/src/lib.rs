//! Offline request interceptor for the ledger.
//!
//! Sits at the network boundary, orthogonal to application logic, and
//! classifies every outgoing read into one of two policies:
//!
//! - **Network-first** for remote-mirror and auth endpoints: try the
//!   network; when it fails, synthesize a structured "offline" response
//!   instead of propagating the transport error.
//! - **Cache-first** for static application assets: serve a captured
//!   response when present, otherwise fetch and capture; when even that
//!   fails and the request wants a full-page document, fall back to the
//!   cached application shell.
//!
//! On [`install`](OfflineInterceptor::install) a fixed manifest of shell
//! assets is captured into a named cache generation; on
//! [`activate`](OfflineInterceptor::activate) every other generation is
//! deleted and the interceptor takes control of open sessions immediately.

mod cache;
mod interceptor;
mod policy;

pub use cache::AssetCache;
pub use interceptor::{AssetRequest, AssetResponse, Fetch, OfflineInterceptor};
pub use policy::{InterceptorConfig, RoutePolicy};

use thiserror::Error;

/// Result type for interceptor operations.
pub type OfflineResult<T> = Result<T, OfflineError>;

/// Errors at the network boundary.
#[derive(Debug, Error)]
pub enum OfflineError {
    /// The underlying transport failed (offline, DNS, reset).
    #[error("network fetch failed: {0}")]
    Network(String),

    /// Offline with no cached copy and no applicable shell fallback.
    #[error("offline and not cached: {0}")]
    NotCached(String),
}
