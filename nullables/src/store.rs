//! Failure-injecting store for degraded-integrity paths in tests.

use poll_store::{MemoryStore, Scope, StorageAdapter, StoreError};
use std::sync::atomic::{AtomicBool, Ordering};

/// An in-memory store whose scopes can be failed independently.
///
/// With `fail_shared` set, every shared-scope operation returns a backend
/// error while local-scope operations keep working, the shape of "the
/// authoritative service is unreachable but the device still has its own
/// storage".
pub struct FlakyStore {
    inner: MemoryStore,
    fail_shared: AtomicBool,
    fail_local: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_shared: AtomicBool::new(false),
            fail_local: AtomicBool::new(false),
        }
    }

    pub fn set_fail_shared(&self, fail: bool) {
        self.fail_shared.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_local(&self, fail: bool) {
        self.fail_local.store(fail, Ordering::Relaxed);
    }

    fn check(&self, scope: Scope) -> Result<(), StoreError> {
        let down = match scope {
            Scope::Shared => self.fail_shared.load(Ordering::Relaxed),
            Scope::Local => self.fail_local.load(Ordering::Relaxed),
        };
        if down {
            Err(StoreError::Backend(format!("{scope:?} scope unavailable")))
        } else {
            Ok(())
        }
    }
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageAdapter for FlakyStore {
    fn get(&self, key: &str, scope: Scope) -> Result<Option<String>, StoreError> {
        self.check(scope)?;
        self.inner.get(key, scope)
    }

    fn set(&self, key: &str, value: &str, scope: Scope) -> Result<(), StoreError> {
        self.check(scope)?;
        self.inner.set(key, value, scope)
    }

    fn delete(&self, key: &str, scope: Scope) -> Result<(), StoreError> {
        self.check(scope)?;
        self.inner.delete(key, scope)
    }

    fn increment(&self, key: &str, scope: Scope) -> Result<u64, StoreError> {
        self.check(scope)?;
        self.inner.increment(key, scope)
    }
}
