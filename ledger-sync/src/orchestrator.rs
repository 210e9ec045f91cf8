//! The sync orchestrator — sequences local mutations with remote mirroring.

use crate::error::SyncResult;
use crate::session::{SessionContext, SessionState};
use crate::status::{Severity, StatusChannel};
use chrono::NaiveDate;
use ledger_cloud::{AuthProvider, MirrorClient, MirrorError};
use ledger_storage::LedgerStore;
use ledger_types::stats::{filter_by_date_range, Statistics};
use ledger_types::{NewRecord, Record};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, info, warn};

/// Coordinates the local store, the remote mirror, and the session lifecycle.
///
/// Mutations commit locally first; the remote mirror is best-effort. Pushes
/// always carry the entire current dataset and are serialized through a
/// single-slot pending queue: a mutation marks the dataset dirty, and
/// whichever task holds the push lock keeps pushing until the dirty flag
/// stays clear. Rapid successive mutations therefore coalesce into one push
/// of the then-current state, and a slow stale push can never land after a
/// newer one.
///
/// Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct SyncOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    store: LedgerStore,
    mirror: Arc<MirrorClient>,
    auth: Arc<dyn AuthProvider>,
    status: StatusChannel,
    session: RwLock<SessionContext>,
    /// Set by mutations, cleared by the push loop. A set flag means the
    /// remote document is behind the local store.
    dirty: AtomicBool,
    /// Single-slot push queue: at most one in-flight push at a time.
    push_lock: TokioMutex<()>,
    /// Serializes sign-in/sign-out against each other.
    session_gate: TokioMutex<()>,
}

impl SyncOrchestrator {
    pub fn new(
        store: LedgerStore,
        mirror: Arc<MirrorClient>,
        auth: Arc<dyn AuthProvider>,
        status: StatusChannel,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                mirror,
                auth,
                status,
                session: RwLock::new(SessionContext::new()),
                dirty: AtomicBool::new(false),
                push_lock: TokioMutex::new(()),
                session_gate: TokioMutex::new(()),
            }),
        }
    }

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        self.inner.session.read().unwrap().state
    }

    // ── Session lifecycle ────────────────────────────────────────

    /// Signs in: acquires a credential, resolves the remote document handle,
    /// and performs the one initial pull. A non-empty remote document
    /// replaces local contents; an empty one leaves them untouched (and is
    /// seeded from local data when any exists).
    ///
    /// On failure, the session returns to `SignedOut` and the error is also
    /// reported on the status channel. Re-signing-in is the retry trigger.
    pub async fn sign_in(&self) -> SyncResult<()> {
        let inner = &self.inner;
        let _gate = inner.session_gate.lock().await;

        {
            let mut session = inner.session.write().unwrap();
            if session.state != SessionState::SignedOut {
                debug!("sign_in ignored: session already active");
                return Ok(());
            }
            session.state = SessionState::Resolving;
        }
        inner.status.report("Signing in…", Severity::Syncing);

        let token = match inner.auth.acquire_token().await {
            Ok(t) => t,
            Err(e) => return Err(inner.fail_sign_in("Authorization failed", e)),
        };

        let handle = match inner.mirror.resolve_handle(&token).await {
            Ok(h) => h,
            Err(e) => return Err(inner.fail_sign_in("Could not reach remote store", e)),
        };

        {
            let mut session = inner.session.write().unwrap();
            session.state = SessionState::PullingInitial;
            session.token = Some(token.clone());
            session.handle = Some(handle.clone());
        }
        inner.status.report("Pulling remote data…", Severity::Syncing);

        let remote = match inner.mirror.pull(&token, &handle).await {
            Ok(records) => records,
            Err(e) => return Err(inner.fail_sign_in("Initial pull failed", e)),
        };

        if remote.is_empty() {
            // Fresh remote document: seed it with current local contents if
            // there are any. A failure here is a plain sync failure — local
            // data stays authoritative.
            let local = match inner.store.list_all() {
                Ok(local) => local,
                Err(e) => {
                    inner.session.write().unwrap().reset();
                    return Err(e.into());
                }
            };
            if !local.is_empty() {
                info!(
                    "remote document empty, seeding with {} local records",
                    local.len()
                );
                if let Err(e) = inner.mirror.push(&token, &handle, &local).await {
                    warn!("seeding remote document failed: {e}");
                    inner
                        .status
                        .report(format!("Sync failed: {e}"), Severity::Error);
                }
            }
        } else {
            info!(
                "replacing local contents with {} remote records",
                remote.len()
            );
            if let Err(e) = inner.store.clear_and_replace(&remote) {
                inner.session.write().unwrap().reset();
                return Err(e.into());
            }
        }

        inner.session.write().unwrap().state = SessionState::Synced;
        inner
            .status
            .report("Signed in and synced", Severity::Success);
        Ok(())
    }

    /// Signs out, discarding the handle and credential. Local data stays.
    ///
    /// The session enters `SigningOut` first, which stops new pushes from
    /// being scheduled, then waits for any in-flight push to finish so the
    /// credential is not discarded out from under it.
    pub async fn sign_out(&self) {
        let _gate = self.inner.session_gate.lock().await;
        {
            let mut session = self.inner.session.write().unwrap();
            if session.state == SessionState::SignedOut {
                return;
            }
            session.state = SessionState::SigningOut;
        }

        let _push = self.inner.push_lock.lock().await;
        self.inner.dirty.store(false, Ordering::SeqCst);
        self.inner.session.write().unwrap().reset();
        info!("signed out, session state discarded");
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Validates and persists a new record, returning its assigned id, then
    /// schedules a full-dataset push when a session is active.
    pub async fn add_record(&self, record: NewRecord) -> SyncResult<i64> {
        record.validate()?;
        let id = self.inner.store.add(&record)?;
        debug!("record {id} added");
        self.schedule_push();
        Ok(id)
    }

    /// Deletes a record by id (no-op when absent), then schedules a push.
    pub async fn delete_record(&self, id: i64) -> SyncResult<()> {
        self.inner.store.delete_by_id(id)?;
        debug!("record {id} deleted");
        self.schedule_push();
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────

    /// All records, newest date first.
    pub fn list_records(&self) -> SyncResult<Vec<Record>> {
        Ok(self.inner.store.list_all()?)
    }

    /// Derived aggregates, optionally restricted to an inclusive date range.
    pub fn statistics(&self, range: Option<(NaiveDate, NaiveDate)>) -> SyncResult<Statistics> {
        let records = self.inner.store.list_all()?;
        let records = match range {
            Some((start, end)) => filter_by_date_range(&records, start, end),
            None => records,
        };
        Ok(Statistics::compute(&records))
    }

    // ── Push sequencing ──────────────────────────────────────────

    /// Marks the dataset dirty and spawns a drain task. The push completes
    /// or fails after the initiating call has returned.
    fn schedule_push(&self) {
        if self.inner.session.read().unwrap().state != SessionState::Synced {
            return;
        }
        self.inner.dirty.store(true, Ordering::SeqCst);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.drain_pushes().await;
        });
    }

    /// Pushes the current dataset immediately, awaiting completion. Useful
    /// for embedders that want a synchronous "sync now" action. Waits for
    /// the push slot rather than bouncing off a concurrent drain.
    pub async fn sync_now(&self) {
        if self.inner.session.read().unwrap().state != SessionState::Synced {
            return;
        }
        self.inner.dirty.store(true, Ordering::SeqCst);
        loop {
            {
                let _guard = self.inner.push_lock.lock().await;
                if !self.inner.push_while_dirty().await {
                    return;
                }
            }
            if !self.inner.dirty.load(Ordering::SeqCst) {
                return;
            }
        }
    }
}

impl Inner {
    /// Single-slot drain loop. The task that wins the lock keeps pushing
    /// full snapshots until the dirty flag stays clear; tasks that lose the
    /// lock just leave. After releasing the lock the winner rechecks the
    /// flag: a mutation can mark the dataset dirty between the winner's
    /// final check and the release, with its own drain task bouncing off
    /// the still-held lock, and without the recheck that push would be
    /// stranded until the next mutation.
    async fn drain_pushes(&self) {
        loop {
            {
                let Ok(_guard) = self.push_lock.try_lock() else {
                    return;
                };
                if !self.push_while_dirty().await {
                    return;
                }
            }
            if !self.dirty.load(Ordering::SeqCst) {
                return;
            }
        }
    }

    /// Pushes full snapshots while the dirty flag keeps getting set. Caller
    /// holds the push lock. Returns `false` when draining must stop early:
    /// push failure (no retry) or no active session.
    async fn push_while_dirty(&self) -> bool {
        while self.dirty.swap(false, Ordering::SeqCst) {
            let Some((token, handle)) = self.session.read().unwrap().push_target() else {
                return false;
            };

            let records = match self.store.list_all() {
                Ok(records) => records,
                Err(e) => {
                    warn!("listing records for push failed: {e}");
                    self.status
                        .report(format!("Sync failed: {e}"), Severity::Error);
                    return false;
                }
            };

            self.status.report("Syncing to remote…", Severity::Syncing);
            match self.mirror.push(&token, &handle, &records).await {
                Ok(()) => {
                    debug!("pushed {} records", records.len());
                    self.status.report("Sync complete", Severity::Success);
                }
                Err(e) => {
                    // Local state already committed; no retry — the next
                    // mutation or a re-sign-in re-triggers the push.
                    warn!("push failed: {e}");
                    self.status
                        .report(format!("Sync failed: {e}"), Severity::Error);
                    return false;
                }
            }
        }
        true
    }

    fn fail_sign_in(&self, context: &str, err: MirrorError) -> crate::SyncError {
        warn!("{context}: {err}");
        self.status
            .report(format!("{context}: {err}"), Severity::Error);
        self.session.write().unwrap().reset();
        err.into()
    }
}
