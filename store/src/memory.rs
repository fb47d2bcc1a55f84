//! Thread-safe in-memory backend.
//!
//! Serves two roles: the device-local scope in production wiring, and the
//! stand-in for the shared service in tests. Each scope is one map behind
//! one mutex, so `increment` is atomic with respect to concurrent callers.

use crate::{Scope, StorageAdapter, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory string store, one map per scope.
pub struct MemoryStore {
    shared: Mutex<HashMap<String, String>>,
    local: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            shared: Mutex::new(HashMap::new()),
            local: Mutex::new(HashMap::new()),
        }
    }

    fn map(&self, scope: Scope) -> &Mutex<HashMap<String, String>> {
        match scope {
            Scope::Shared => &self.shared,
            Scope::Local => &self.local,
        }
    }

    fn lock_map(
        &self,
        scope: Scope,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.map(scope)
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageAdapter for MemoryStore {
    fn get(&self, key: &str, scope: Scope) -> Result<Option<String>, StoreError> {
        Ok(self.lock_map(scope)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str, scope: Scope) -> Result<(), StoreError> {
        self.lock_map(scope)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str, scope: Scope) -> Result<(), StoreError> {
        self.lock_map(scope)?.remove(key);
        Ok(())
    }

    fn increment(&self, key: &str, scope: Scope) -> Result<u64, StoreError> {
        // Parse and write-back under a single lock acquisition.
        let mut map = self.lock_map(scope)?;
        let current = match map.get(key) {
            Some(raw) => raw.parse::<u64>().map_err(|_| StoreError::CorruptCounter {
                key: key.to_string(),
                value: raw.clone(),
            })?,
            None => 0,
        };
        let next = current + 1;
        map.insert(key.to_string(), next.to_string());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn set_get_delete_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k", Scope::Shared).unwrap(), None);
        store.set("k", "v", Scope::Shared).unwrap();
        assert_eq!(store.get("k", Scope::Shared).unwrap(), Some("v".into()));
        store.delete("k", Scope::Shared).unwrap();
        assert_eq!(store.get("k", Scope::Shared).unwrap(), None);
    }

    #[test]
    fn scopes_are_isolated() {
        let store = MemoryStore::new();
        store.set("k", "shared", Scope::Shared).unwrap();
        assert_eq!(store.get("k", Scope::Local).unwrap(), None);
        store.set("k", "local", Scope::Local).unwrap();
        assert_eq!(store.get("k", Scope::Shared).unwrap(), Some("shared".into()));
        assert_eq!(store.get("k", Scope::Local).unwrap(), Some("local".into()));
    }

    #[test]
    fn increment_starts_from_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.increment("n", Scope::Shared).unwrap(), 1);
        assert_eq!(store.increment("n", Scope::Shared).unwrap(), 2);
        assert_eq!(store.get("n", Scope::Shared).unwrap(), Some("2".into()));
    }

    #[test]
    fn increment_rejects_corrupt_counter() {
        let store = MemoryStore::new();
        store.set("n", "not-a-number", Scope::Shared).unwrap();
        assert!(matches!(
            store.increment("n", Scope::Shared),
            Err(StoreError::CorruptCounter { .. })
        ));
    }

    #[test]
    fn concurrent_increments_lose_no_updates() {
        let store = Arc::new(MemoryStore::new());
        let threads = 8;
        let per_thread = 250;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..per_thread {
                        store.increment("hot", Scope::Shared).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(
            store.get("hot", Scope::Shared).unwrap(),
            Some((threads * per_thread).to_string())
        );
    }
}
