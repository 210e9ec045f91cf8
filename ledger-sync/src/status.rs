//! Transient user-facing status channel.
//!
//! The presentation layer owns the receiving side and decides how long to
//! show each update (success messages are typically auto-dismissed after a
//! few seconds). The orchestrator never blocks on a slow or absent consumer.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Severity of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Syncing,
    Success,
    Error,
}

/// One transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub message: String,
    pub severity: Severity,
}

/// Sending side of the status channel.
#[derive(Clone)]
pub struct StatusChannel {
    tx: mpsc::Sender<StatusUpdate>,
}

impl StatusChannel {
    /// Creates a bounded channel; the receiver goes to the presentation layer.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<StatusUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Fire-and-forget report. Dropped when the buffer is full or the
    /// receiver is gone — status updates are advisory, never load-bearing.
    pub fn report(&self, message: impl Into<String>, severity: Severity) {
        let _ = self.tx.try_send(StatusUpdate {
            message: message.into(),
            severity,
        });
    }
}
