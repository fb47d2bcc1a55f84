//! Vote tallying and outcome computation.
//!
//! Tallies are monotone per-candidate counters in the shared store, only
//! ever mutated through the atomic increment. Outcomes are derived on
//! demand and never persisted.

pub mod engine;
pub mod outcome;

pub use engine::TallyEngine;
pub use outcome::{
    compute_general_outcome, compute_primary_outcome, compute_runoff_outcome, OutcomeStatus,
    PhaseOutcome, RankedCandidate, ResultsDisplay,
};
