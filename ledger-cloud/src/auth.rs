//! Credential acquisition seam.
//!
//! Credential acquisition (OAuth consent, token refresh UI) is an external
//! collaborator. The mirror client only consumes bearer tokens; callers
//! suspend on [`AuthProvider::acquire_token`] until a token or a structured
//! authorization failure comes back.

use crate::error::MirrorResult;
use async_trait::async_trait;

/// Awaitable bearer-credential source.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolves to a bearer token, or [`MirrorError::AuthFailed`] /
    /// [`MirrorError::AuthRequired`] when authorization cannot complete.
    ///
    /// [`MirrorError::AuthFailed`]: crate::MirrorError::AuthFailed
    /// [`MirrorError::AuthRequired`]: crate::MirrorError::AuthRequired
    async fn acquire_token(&self) -> MirrorResult<String>;
}

/// Provider that always hands out the same token. Useful for tests and for
/// embedders that manage tokens out-of-band.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn acquire_token(&self) -> MirrorResult<String> {
        Ok(self.token.clone())
    }
}
