//! Tally reads and the single legitimate mutator.

use poll_store::{KeySpace, Scope, StorageAdapter, StoreError};
use poll_types::{Candidate, Phase};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Reads and increments per-candidate counters in the shared store.
pub struct TallyEngine {
    store: Arc<dyn StorageAdapter>,
    keys: KeySpace,
}

impl TallyEngine {
    pub fn new(store: Arc<dyn StorageAdapter>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Atomically add one vote for a candidate and return the new count.
    ///
    /// This is the only write path for tallies; the backend performs the
    /// add under a single atomic operation so concurrent devices never lose
    /// an update.
    pub fn increment(&self, phase: Phase, candidate_id: &str) -> Result<u64, StoreError> {
        let key = self.keys.tally(phase, candidate_id);
        let count = self.store.increment(&key, Scope::Shared)?;
        debug!(%phase, candidate_id, count, "tally incremented");
        Ok(count)
    }

    /// Read one candidate's count. Absent entries are zero, not errors.
    pub fn count(&self, phase: Phase, candidate_id: &str) -> Result<u64, StoreError> {
        let key = self.keys.tally(phase, candidate_id);
        match self.store.get(&key, Scope::Shared)? {
            Some(raw) => raw.parse::<u64>().map_err(|_| StoreError::CorruptCounter {
                key,
                value: raw,
            }),
            None => Ok(0),
        }
    }

    /// Load the full tally map for a candidate set.
    pub fn load(
        &self,
        phase: Phase,
        candidates: &[Candidate],
    ) -> Result<HashMap<String, u64>, StoreError> {
        let mut tallies = HashMap::with_capacity(candidates.len());
        for candidate in candidates {
            tallies.insert(candidate.id.clone(), self.count(phase, &candidate.id)?);
        }
        Ok(tallies)
    }
}
