//! Scope-routing store: a shared service plus device-local storage.
//!
//! Production wiring is one authoritative backend every client talks to and
//! one backend private to the device. `SplitStore` routes by scope so the
//! rest of the engine stays backend-agnostic; many devices share the same
//! `shared` handle while each owns its `local` one.

use crate::{Scope, StorageAdapter, StoreError};
use std::sync::Arc;

/// Routes shared-scope operations to one backend and local-scope to another.
pub struct SplitStore {
    shared: Arc<dyn StorageAdapter>,
    local: Arc<dyn StorageAdapter>,
}

impl SplitStore {
    pub fn new(shared: Arc<dyn StorageAdapter>, local: Arc<dyn StorageAdapter>) -> Self {
        Self { shared, local }
    }

    fn route(&self, scope: Scope) -> &dyn StorageAdapter {
        match scope {
            Scope::Shared => self.shared.as_ref(),
            Scope::Local => self.local.as_ref(),
        }
    }
}

impl StorageAdapter for SplitStore {
    fn get(&self, key: &str, scope: Scope) -> Result<Option<String>, StoreError> {
        self.route(scope).get(key, scope)
    }

    fn set(&self, key: &str, value: &str, scope: Scope) -> Result<(), StoreError> {
        self.route(scope).set(key, value, scope)
    }

    fn delete(&self, key: &str, scope: Scope) -> Result<(), StoreError> {
        self.route(scope).delete(key, scope)
    }

    fn increment(&self, key: &str, scope: Scope) -> Result<u64, StoreError> {
        self.route(scope).increment(key, scope)
    }
}
