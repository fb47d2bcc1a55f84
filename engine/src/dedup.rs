//! Dedup locks: at most one vote per device per phase.
//!
//! A lock is a marker key derived from the fingerprint prefix, written to
//! BOTH scopes only after the tally increment has durably succeeded. Write
//! ordering matters: a crash between increment and lock yields a device
//! that could vote twice, which is preferred over a lock without a counted
//! vote (a voter silently disenfranchised).

use poll_fingerprint::Fingerprint;
use poll_store::{KeySpace, Scope, StorageAdapter, StoreError};
use poll_types::Phase;
use std::sync::Arc;
use tracing::warn;

/// How completely a lock is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockIntegrity {
    /// The shared store holds the lock. Every client observes it.
    Full,
    /// Only this device's local store holds the lock. Repeat votes from
    /// this device are still blocked, but other devices cannot see it.
    LocalOnly,
}

/// Result of a pre-vote lock check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockCheck {
    pub locked: bool,
    /// True when the shared store could not be consulted and the answer
    /// rests on the local copy alone.
    pub degraded: bool,
}

/// Checks and writes dedup locks in both scopes.
pub struct DedupLockManager {
    store: Arc<dyn StorageAdapter>,
    keys: KeySpace,
    prefix_len: usize,
}

impl DedupLockManager {
    pub fn new(store: Arc<dyn StorageAdapter>, keys: KeySpace, prefix_len: usize) -> Self {
        Self {
            store,
            keys,
            prefix_len,
        }
    }

    fn key(&self, phase: Phase, fingerprint: &Fingerprint) -> String {
        self.keys.lock(phase, fingerprint.prefix(self.prefix_len))
    }

    /// Is this device locked out of `phase`?
    ///
    /// When the shared store is unreachable, the local copy still answers;
    /// the result is marked degraded so callers can surface it. Errors only
    /// propagate when neither scope can be read.
    pub fn is_locked(
        &self,
        phase: Phase,
        fingerprint: &Fingerprint,
    ) -> Result<LockCheck, StoreError> {
        let key = self.key(phase, fingerprint);
        match self.store.get(&key, Scope::Shared) {
            Ok(Some(_)) => Ok(LockCheck {
                locked: true,
                degraded: false,
            }),
            Ok(None) => {
                let locked = self.store.get(&key, Scope::Local)?.is_some();
                Ok(LockCheck {
                    locked,
                    degraded: false,
                })
            }
            Err(shared_err) => {
                warn!(%phase, error = %shared_err, "shared lock check failed; consulting local copy");
                let locked = self.store.get(&key, Scope::Local)?.is_some();
                Ok(LockCheck {
                    locked,
                    degraded: true,
                })
            }
        }
    }

    /// Record the lock in both scopes. Call only after the tally increment
    /// succeeded.
    ///
    /// Errors only when neither scope accepted the write; a one-scope
    /// failure degrades integrity instead of failing the vote, which by
    /// this point has already been counted.
    pub fn acquire(
        &self,
        phase: Phase,
        fingerprint: &Fingerprint,
        nonce: u64,
    ) -> Result<LockIntegrity, StoreError> {
        let key = self.key(phase, fingerprint);
        let value = nonce.to_string();
        let shared = self.store.set(&key, &value, Scope::Shared);
        let local = self.store.set(&key, &value, Scope::Local);
        match (shared, local) {
            (Ok(()), Ok(())) => Ok(LockIntegrity::Full),
            (Ok(()), Err(local_err)) => {
                warn!(%phase, error = %local_err, "local lock copy failed; shared lock holds");
                Ok(LockIntegrity::Full)
            }
            (Err(shared_err), Ok(())) => {
                warn!(%phase, error = %shared_err, "shared lock failed; local copy only");
                Ok(LockIntegrity::LocalOnly)
            }
            (Err(shared_err), Err(_)) => Err(shared_err),
        }
    }
}
