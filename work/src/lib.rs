//! Anti-abuse proof-of-work.
//!
//! Not mining: a lightweight computational cost (fractions of a second)
//! that rate-limits scripted bulk submission while staying imperceptible to
//! a human voter. The challenge binds to the namespace, phase, and candidate
//! being voted for, so a solution cannot be precomputed or replayed against
//! a different vote.

pub mod context;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod validator;

pub use context::WorkContext;
pub use difficulty::leading_zero_bits;
pub use error::WorkError;
pub use generator::{CancelToken, WorkGenerator};
pub use validator::validate_work;

/// The result of a PoW search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkNonce(pub u64);
