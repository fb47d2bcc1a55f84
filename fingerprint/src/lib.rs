//! Device fingerprinting.
//!
//! A fingerprint is a 64-hex-character Blake2b digest over coarse device
//! signals plus a persisted random salt. It is a deterrent for duplicate
//! voting, not an identity proof: stable for one device within a session,
//! fresh once the salt is cleared. Any individual signal may be missing;
//! that degrades entropy but never errors. Only a failure to obtain salt
//! entropy blocks fingerprinting (and with it, voting).

pub mod error;
pub mod signals;

pub use error::FingerprintError;
pub use signals::DeviceSignals;

use poll_crypto::hex_digest;
use poll_store::{KeySpace, Scope, StorageAdapter};
use std::sync::Arc;

/// A computed device fingerprint: 64 lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fixed-length prefix used in dedup lock keys.
    pub fn prefix(&self, len: usize) -> &str {
        &self.0[..len.min(self.0.len())]
    }
}

/// Derives stable fingerprints, persisting the salt on first use.
pub struct FingerprintGenerator {
    store: Arc<dyn StorageAdapter>,
    keys: KeySpace,
}

impl FingerprintGenerator {
    pub fn new(store: Arc<dyn StorageAdapter>, keys: KeySpace) -> Self {
        Self { store, keys }
    }

    /// Compute the fingerprint for this device.
    ///
    /// Deterministic for the same signals + persisted salt; changes when the
    /// salt is cleared (a fresh one is generated).
    pub fn compute(&self, signals: &DeviceSignals) -> Result<Fingerprint, FingerprintError> {
        let salt = self.load_or_create_salt()?;
        let material = format!("{}|{}", signals.canonical(), salt);
        Ok(Fingerprint(hex_digest(material.as_bytes())))
    }

    fn load_or_create_salt(&self) -> Result<String, FingerprintError> {
        let key = self.keys.salt();
        if let Some(salt) = self
            .store
            .get(&key, Scope::Local)
            .map_err(|e| FingerprintError::SaltStorage(e.to_string()))?
        {
            if !salt.is_empty() {
                return Ok(salt);
            }
        }
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| FingerprintError::EntropyUnavailable(e.to_string()))?;
        let salt = hex::encode(bytes);
        self.store
            .set(&key, &salt, Scope::Local)
            .map_err(|e| FingerprintError::SaltStorage(e.to_string()))?;
        Ok(salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_store::MemoryStore;

    fn signals() -> DeviceSignals {
        DeviceSignals {
            user_agent: Some("TestAgent/1.0".into()),
            display: Some((1920, 1080, 24)),
            timezone_offset_minutes: Some(-360),
            locale: Some("en-US".into()),
            hardware_concurrency: Some(8),
            surface_signature: Some("surface-sig".into()),
        }
    }

    fn generator(store: Arc<dyn StorageAdapter>) -> FingerprintGenerator {
        FingerprintGenerator::new(store, KeySpace::new("t"))
    }

    #[test]
    fn stable_for_same_device_and_salt() {
        let gen = generator(Arc::new(MemoryStore::new()));
        let a = gen.compute(&signals()).unwrap();
        let b = gen.compute(&signals()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn changes_when_salt_is_cleared() {
        let store: Arc<dyn StorageAdapter> = Arc::new(MemoryStore::new());
        let gen = generator(Arc::clone(&store));
        let before = gen.compute(&signals()).unwrap();
        store.delete(&KeySpace::new("t").salt(), Scope::Local).unwrap();
        let after = gen.compute(&signals()).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn missing_signals_do_not_error() {
        let gen = generator(Arc::new(MemoryStore::new()));
        let fp = gen.compute(&DeviceSignals::default()).unwrap();
        assert_eq!(fp.as_str().len(), 64);
    }

    #[test]
    fn different_signals_differ() {
        let gen = generator(Arc::new(MemoryStore::new()));
        let a = gen.compute(&signals()).unwrap();
        let mut other = signals();
        other.locale = Some("de-DE".into());
        let b = gen.compute(&other).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn prefix_is_fixed_length() {
        let gen = generator(Arc::new(MemoryStore::new()));
        let fp = gen.compute(&signals()).unwrap();
        assert_eq!(fp.prefix(16).len(), 16);
        assert!(fp.as_str().starts_with(fp.prefix(16)));
    }
}
