//! Device-local session record.
//!
//! Enough to rebuild a completed walk after a page reload or process
//! restart: the chosen party, each phase's pick, and the candidate sets
//! frozen at routing time. Advisory only; the shared store's tallies and
//! locks remain the ground truth for counting and dedup.

use poll_store::{KeySpace, Scope, StorageAdapter, StoreError};
use poll_types::{Candidate, Party};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub party: Option<Party>,
    pub primary_vote: Option<String>,
    pub runoff_vote: Option<String>,
    pub general_vote: Option<String>,
    /// Top two frozen when the primary routed to a runoff.
    pub runoff_candidates: Option<Vec<Candidate>>,
    /// The synthesized two-slot general ballot, frozen at routing time.
    pub general_candidates: Option<Vec<Candidate>>,
}

impl SessionRecord {
    /// A session is restorable once its primary vote is recorded; the rest
    /// of the walk is rebuilt from whatever else was persisted.
    pub fn is_restorable(&self) -> bool {
        self.party.is_some() && self.primary_vote.is_some()
    }

    /// Load the record, treating absence as a fresh session and a garbled
    /// record as absent.
    pub fn load(store: &dyn StorageAdapter, keys: &KeySpace) -> Result<Option<Self>, StoreError> {
        match store.get(&keys.session(), Scope::Local)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    warn!(error = %err, "session record is malformed; starting fresh");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    pub fn save(&self, store: &dyn StorageAdapter, keys: &KeySpace) -> Result<(), StoreError> {
        let raw = serde_json::to_string(self)
            .map_err(|e| StoreError::Backend(format!("session serialization: {e}")))?;
        store.set(&keys.session(), &raw, Scope::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_store::MemoryStore;

    #[test]
    fn round_trips_through_the_store() {
        let store = MemoryStore::new();
        let keys = KeySpace::new("t");
        let record = SessionRecord {
            party: Some(Party::A),
            primary_vote: Some("c1".into()),
            general_candidates: Some(vec![Candidate::new("side_a", "One", Party::A)]),
            ..Default::default()
        };
        record.save(&store, &keys).unwrap();
        assert_eq!(SessionRecord::load(&store, &keys).unwrap(), Some(record));
    }

    #[test]
    fn absent_record_loads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(SessionRecord::load(&store, &KeySpace::new("t")).unwrap(), None);
    }

    #[test]
    fn malformed_record_loads_as_none() {
        let store = MemoryStore::new();
        let keys = KeySpace::new("t");
        store.set(&keys.session(), "{broken", Scope::Local).unwrap();
        assert_eq!(SessionRecord::load(&store, &keys).unwrap(), None);
    }

    #[test]
    fn restorable_requires_party_and_primary_vote() {
        let mut record = SessionRecord::default();
        assert!(!record.is_restorable());
        record.party = Some(Party::B);
        assert!(!record.is_restorable());
        record.primary_vote = Some("c9".into());
        assert!(record.is_restorable());
    }
}
