//! Abstract storage adapter for the poll engine.
//!
//! Every backend (shared authoritative service, device-local fallback,
//! in-memory for testing) implements [`StorageAdapter`]. The rest of the
//! codebase depends only on the trait.
//!
//! `increment` is a first-class operation: tallies must never be bumped by
//! reading the old value and writing old+1 in two round trips, because two
//! devices doing that concurrently lose an update. Backends implement the
//! add atomically (single lock, transactional upsert, or server-side add).

pub mod error;
pub mod keys;
pub mod memory;
pub mod split;
pub mod tiered;

pub use error::StoreError;
pub use keys::KeySpace;
pub use memory::MemoryStore;
pub use split::SplitStore;
pub use tiered::{ServedBy, TieredStore};

/// Which backing store a key lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// The authoritative multi-client store. Tallies and dedup locks live
    /// here; it is the only scope other devices can observe.
    Shared,
    /// This device only. Session records, seeds, salts, and the redundant
    /// copy of dedup locks.
    Local,
}

/// Abstract get/set/delete/increment over string keys.
///
/// Values are strings; structured data is JSON-encoded by callers.
/// Operations that do not complete within the backend's bounded interval
/// must return `StoreError::Timeout`, never pretend success.
pub trait StorageAdapter: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent, which is not an
    /// error: tally entries default to zero until first incremented.
    fn get(&self, key: &str, scope: Scope) -> Result<Option<String>, StoreError>;

    /// Write a value.
    fn set(&self, key: &str, value: &str, scope: Scope) -> Result<(), StoreError>;

    /// Best-effort delete. Absent keys are not an error.
    fn delete(&self, key: &str, scope: Scope) -> Result<(), StoreError>;

    /// Atomically add one to the counter at `key` and return the new value.
    /// An absent key counts as zero.
    fn increment(&self, key: &str, scope: Scope) -> Result<u64, StoreError>;
}
