use poll_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BallotError {
    #[error("no entropy available for shuffle seed: {0}")]
    EntropyUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
