use thiserror::Error;

/// The search has no failure mode of its own: it either completes or the
/// caller cancels it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("proof-of-work search was cancelled")]
    Cancelled,
}
