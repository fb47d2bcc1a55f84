//! Shuffle seed generation and persistence.

use crate::error::BallotError;
use crate::shuffle::shuffle;
use poll_store::{KeySpace, Scope, StorageAdapter};
use poll_types::{Candidate, Party, Phase};
use std::sync::Arc;

/// A 32-byte shuffle seed drawn from strong randomness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleSeed([u8; 32]);

impl ShuffleSeed {
    /// Draw a fresh seed from the OS entropy source.
    pub fn generate() -> Result<Self, BallotError> {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| BallotError::EntropyUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a persisted hex seed. Returns `None` on any malformation, in
    /// which case the caller generates a fresh seed.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let decoded = hex::decode(raw).ok()?;
        let bytes: [u8; 32] = decoded.try_into().ok()?;
        Some(Self(bytes))
    }
}

/// Produces ballots with session-stable ordering.
///
/// The seed for each `(phase, party)` is persisted device-locally on first
/// use; later calls (including session restore) re-derive the same order
/// from the stored seed instead of generating a new one.
pub struct BallotManager {
    store: Arc<dyn StorageAdapter>,
    keys: KeySpace,
}

impl BallotManager {
    pub fn new(store: Arc<dyn StorageAdapter>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Order a candidate list for one phase/party ballot.
    pub fn ballot_for(
        &self,
        phase: Phase,
        party: Party,
        candidates: &[Candidate],
    ) -> Result<Vec<Candidate>, BallotError> {
        let seed = self.seed_for(phase, party)?;
        Ok(shuffle(candidates, &seed))
    }

    /// Load the persisted seed for `(phase, party)`, generating and
    /// persisting one if absent.
    pub fn seed_for(&self, phase: Phase, party: Party) -> Result<ShuffleSeed, BallotError> {
        let key = self.keys.seed(phase, party);
        if let Some(raw) = self.store.get(&key, Scope::Local)? {
            if let Some(seed) = ShuffleSeed::from_hex(&raw) {
                return Ok(seed);
            }
        }
        let seed = ShuffleSeed::generate()?;
        self.store.set(&key, &seed.to_hex(), Scope::Local)?;
        Ok(seed)
    }
}
