//! Ranked fallback chain over storage backends.
//!
//! The original deployment tried an authoritative remote store and fell back
//! to a device-local one, silently. Here the chain is explicit: backends are
//! tried in rank order and every operation reports which tier served it, so
//! degraded-integrity conditions are observable by the caller instead of
//! disappearing into a catch.

use crate::{Scope, StorageAdapter, StoreError};
use std::sync::Arc;
use tracing::warn;

/// Which tier ultimately served an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServedBy {
    /// Index into the ranked backend list; 0 is the authoritative tier.
    pub tier: usize,
    pub name: String,
}

impl ServedBy {
    /// True when the authoritative (rank 0) backend answered.
    pub fn authoritative(&self) -> bool {
        self.tier == 0
    }
}

/// A named backend in the chain.
struct Tier {
    name: String,
    backend: Arc<dyn StorageAdapter>,
}

/// Storage adapter that tries each backend in rank order.
pub struct TieredStore {
    tiers: Vec<Tier>,
}

impl TieredStore {
    pub fn new() -> Self {
        Self { tiers: Vec::new() }
    }

    /// Append a backend at the next (lower-trust) rank.
    pub fn with_tier(mut self, name: impl Into<String>, backend: Arc<dyn StorageAdapter>) -> Self {
        self.tiers.push(Tier {
            name: name.into(),
            backend,
        });
        self
    }

    fn run<T>(
        &self,
        op: &str,
        key: &str,
        f: impl Fn(&dyn StorageAdapter) -> Result<T, StoreError>,
    ) -> Result<(T, ServedBy), StoreError> {
        let mut last_err = StoreError::Backend("no storage tiers configured".into());
        for (rank, tier) in self.tiers.iter().enumerate() {
            match f(tier.backend.as_ref()) {
                Ok(value) => {
                    if rank > 0 {
                        warn!(op, key, tier = %tier.name, rank, "served by fallback storage tier");
                    }
                    return Ok((
                        value,
                        ServedBy {
                            tier: rank,
                            name: tier.name.clone(),
                        },
                    ));
                }
                Err(err) => {
                    warn!(op, key, tier = %tier.name, rank, %err, "storage tier failed");
                    last_err = err;
                }
            }
        }
        Err(StoreError::AllTiersFailed(last_err.to_string()))
    }

    /// `get` with tier attribution.
    pub fn get_traced(
        &self,
        key: &str,
        scope: Scope,
    ) -> Result<(Option<String>, ServedBy), StoreError> {
        self.run("get", key, |b| b.get(key, scope))
    }

    /// `set` with tier attribution.
    pub fn set_traced(
        &self,
        key: &str,
        value: &str,
        scope: Scope,
    ) -> Result<ServedBy, StoreError> {
        self.run("set", key, |b| b.set(key, value, scope))
            .map(|((), served)| served)
    }

    /// `increment` with tier attribution. A non-authoritative serve means
    /// the count forked away from the shared truth; the caller decides
    /// whether that is acceptable for the key in question.
    pub fn increment_traced(
        &self,
        key: &str,
        scope: Scope,
    ) -> Result<(u64, ServedBy), StoreError> {
        self.run("increment", key, |b| b.increment(key, scope))
    }
}

impl Default for TieredStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageAdapter for TieredStore {
    fn get(&self, key: &str, scope: Scope) -> Result<Option<String>, StoreError> {
        self.get_traced(key, scope).map(|(v, _)| v)
    }

    fn set(&self, key: &str, value: &str, scope: Scope) -> Result<(), StoreError> {
        self.set_traced(key, value, scope).map(|_| ())
    }

    fn delete(&self, key: &str, scope: Scope) -> Result<(), StoreError> {
        // Best-effort on every tier; a key may exist at several ranks.
        for tier in &self.tiers {
            if let Err(err) = tier.backend.delete(key, scope) {
                warn!(key, tier = %tier.name, %err, "delete failed on tier");
            }
        }
        Ok(())
    }

    fn increment(&self, key: &str, scope: Scope) -> Result<u64, StoreError> {
        self.increment_traced(key, scope).map(|(v, _)| v)
    }
}
