use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage operation timed out after {0}s")]
    Timeout(u64),

    #[error("counter at {key} is corrupted: {value:?}")]
    CorruptCounter { key: String, value: String },

    #[error("all storage tiers failed; last error: {0}")]
    AllTiersFailed(String),
}
