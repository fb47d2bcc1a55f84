//! Deterministic, session-persistent ballot ordering.
//!
//! Candidate order is a seeded Fisher–Yates permutation. The seed comes
//! from strong randomness exactly once per `(phase, party)` and is
//! persisted, so a restored session re-derives the identical order while
//! uncorrelated sessions get statistically independent ones.

pub mod error;
pub mod seed;
pub mod shuffle;

pub use error::BallotError;
pub use seed::{BallotManager, ShuffleSeed};
pub use shuffle::shuffle;
