//! Fundamental types for the straw-poll tally engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: candidates, parties, phases, timestamps, participation tiers,
//! and poll parameters.

pub mod candidate;
pub mod params;
pub mod phase;
pub mod tier;
pub mod time;

pub use candidate::{Candidate, Party};
pub use params::PollParams;
pub use phase::Phase;
pub use tier::ParticipationTier;
pub use time::Timestamp;
