use thiserror::Error;

/// Fingerprinting fails closed: without a fingerprint, voting is blocked.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("no entropy available for fingerprint salt: {0}")]
    EntropyUnavailable(String),

    #[error("could not persist fingerprint salt: {0}")]
    SaltStorage(String),
}
