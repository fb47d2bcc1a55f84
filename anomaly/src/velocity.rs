//! Bounded vote-timestamp log, one per phase.

use poll_store::{Scope, StorageAdapter, StoreError};
use poll_types::Timestamp;

/// An ordered sequence of vote timestamps, pruned on append so storage
/// growth stays bounded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VelocityLog {
    entries: Vec<Timestamp>,
}

impl VelocityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Timestamp>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Timestamp] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `now`, dropping entries older than `retention_secs` and, past
    /// that, the oldest entries above `max_entries`.
    pub fn append(&mut self, now: Timestamp, retention_secs: u64, max_entries: usize) {
        self.entries.push(now);
        self.entries
            .retain(|t| t.elapsed_since(now) < retention_secs);
        if self.entries.len() > max_entries {
            let excess = self.entries.len() - max_entries;
            self.entries.drain(0..excess);
        }
    }

    /// Count entries whose age falls in `[min_age, max_age)` seconds.
    pub fn count_in_window(&self, now: Timestamp, min_age: u64, max_age: u64) -> u64 {
        self.entries
            .iter()
            .filter(|t| {
                let age = t.elapsed_since(now);
                age >= min_age && age < max_age
            })
            .count() as u64
    }

    /// Load the log for a key, treating absence or malformation as empty.
    ///
    /// A garbled log is advisory data not worth failing a vote over; it is
    /// replaced wholesale on the next append.
    pub fn load(store: &dyn StorageAdapter, key: &str) -> Result<Self, StoreError> {
        match store.get(key, Scope::Shared)? {
            Some(raw) => {
                let secs: Vec<u64> = serde_json::from_str(&raw).unwrap_or_default();
                Ok(Self::from_entries(secs.into_iter().map(Timestamp::new).collect()))
            }
            None => Ok(Self::new()),
        }
    }

    /// Persist the log under a key.
    pub fn save(&self, store: &dyn StorageAdapter, key: &str) -> Result<(), StoreError> {
        let secs: Vec<u64> = self.entries.iter().map(|t| t.as_secs()).collect();
        let raw = serde_json::to_string(&secs)
            .map_err(|e| StoreError::Backend(format!("velocity log serialization: {e}")))?;
        store.set(key, &raw, Scope::Shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_store::MemoryStore;

    #[test]
    fn append_prunes_old_entries() {
        let mut log = VelocityLog::new();
        log.append(Timestamp::new(100), 3600, 100);
        log.append(Timestamp::new(200), 3600, 100);
        // Jump far enough that both earlier entries age out.
        log.append(Timestamp::new(10_000), 3600, 100);
        assert_eq!(log.entries(), &[Timestamp::new(10_000)]);
    }

    #[test]
    fn append_caps_entry_count() {
        let mut log = VelocityLog::new();
        for i in 0..20 {
            log.append(Timestamp::new(1000 + i), 3600, 8);
        }
        assert_eq!(log.len(), 8);
        // Oldest entries were the ones evicted.
        assert_eq!(log.entries()[0], Timestamp::new(1012));
    }

    #[test]
    fn window_counts() {
        let now = Timestamp::new(2000);
        let log = VelocityLog::from_entries(vec![
            Timestamp::new(1950), // age 50: recent
            Timestamp::new(1850), // age 150: prior
            Timestamp::new(1700), // age 300: outside both
        ]);
        assert_eq!(log.count_in_window(now, 0, 100), 1);
        assert_eq!(log.count_in_window(now, 100, 200), 1);
    }

    #[test]
    fn load_save_round_trip() {
        let store = MemoryStore::new();
        let mut log = VelocityLog::new();
        log.append(Timestamp::new(5), 3600, 100);
        log.append(Timestamp::new(9), 3600, 100);
        log.save(&store, "ns:vel:primary").unwrap();
        let loaded = VelocityLog::load(&store, "ns:vel:primary").unwrap();
        assert_eq!(loaded, log);
    }

    #[test]
    fn malformed_log_loads_as_empty() {
        let store = MemoryStore::new();
        store.set("k", "{not json]", Scope::Shared).unwrap();
        assert!(VelocityLog::load(&store, "k").unwrap().is_empty());
    }
}
