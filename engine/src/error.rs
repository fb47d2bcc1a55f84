use poll_fingerprint::FingerprintError;
use poll_store::StoreError;
use poll_types::Phase;
use poll_work::WorkError;
use thiserror::Error;

use crate::machine::MachineError;

/// Everything that can stop a vote from committing.
///
/// `Storage` is the only variant that can fire after work has started but
/// before the tally write; in that case nothing was counted and nothing was
/// locked, so the voter may simply retry.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("this device has already voted in the {phase} phase")]
    AlreadyVoted { phase: Phase },

    #[error("device fingerprint unavailable; voting is blocked")]
    Fingerprint(#[source] FingerprintError),

    #[error("proof-of-work search was cancelled")]
    WorkCancelled,

    #[error(transparent)]
    Machine(#[from] MachineError),

    #[error("ballot error: {0}")]
    Ballot(String),
}

impl From<FingerprintError> for VoteError {
    fn from(err: FingerprintError) -> Self {
        Self::Fingerprint(err)
    }
}

impl From<WorkError> for VoteError {
    fn from(err: WorkError) -> Self {
        match err {
            WorkError::Cancelled => Self::WorkCancelled,
        }
    }
}

impl From<poll_ballot::BallotError> for VoteError {
    fn from(err: poll_ballot::BallotError) -> Self {
        match err {
            poll_ballot::BallotError::Storage(e) => Self::Storage(e),
            other => Self::Ballot(other.to_string()),
        }
    }
}
