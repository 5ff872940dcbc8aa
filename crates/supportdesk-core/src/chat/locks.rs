//! Per-session turn serialization.
//!
//! Two messages sent to the same conversation at once would otherwise
//! interleave their writes and read each other's half-finished turns into the
//! prompt. `SessionLocks` hands out one async mutex per session id; distinct
//! sessions never contend. Entries are dropped once nobody holds or waits on
//! them, so the table only grows with the number of in-flight sessions.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Table of per-session mutexes.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other turn is running for `session_id`.
    pub async fn acquire(&self, session_id: Uuid) -> SessionGuard {
        let mutex = self
            .locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;

        SessionGuard {
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
            session_id,
        }
    }

    /// Number of sessions that currently have a lock entry.
    pub fn active_sessions(&self) -> usize {
        self.locks.len()
    }
}

/// Held for the duration of one turn. Releases and garbage-collects on drop.
pub struct SessionGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
    session_id: Uuid,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        // Release first so our own Arc no longer counts.
        self.guard.take();
        // The map's Arc is the only one left when nobody is waiting.
        self.locks
            .remove_if(&self.session_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
