//! Explicit session context for the signed-in lifecycle.
//!
//! Credential, handle, and signed-in state travel together in one object
//! owned by the orchestrator — never ambient globals.

use ledger_cloud::FileHandle;

/// State machine over signed-in sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial state: no handle, no remote operations permitted.
    SignedOut,
    /// Transient: resolving the remote document handle after sign-in.
    Resolving,
    /// Transient: performing the one initial pull.
    PullingInitial,
    /// Steady state: every local mutation triggers a full-dataset push.
    Synced,
    /// Transient: discarding handle and credential.
    SigningOut,
}

/// Session-scoped mutable state. The handle and token live exactly as long
/// as the signed-in session.
#[derive(Debug)]
pub(crate) struct SessionContext {
    pub state: SessionState,
    pub token: Option<String>,
    pub handle: Option<FileHandle>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            state: SessionState::SignedOut,
            token: None,
            handle: None,
        }
    }

    /// Snapshot of the credentials needed for a push, present only in
    /// `Synced` state.
    pub fn push_target(&self) -> Option<(String, FileHandle)> {
        if self.state != SessionState::Synced {
            return None;
        }
        Some((self.token.clone()?, self.handle.clone()?))
    }

    /// Drops all session-scoped state, returning to `SignedOut`.
    pub fn reset(&mut self) {
        self.state = SessionState::SignedOut;
        self.token = None;
        self.handle = None;
    }
}
