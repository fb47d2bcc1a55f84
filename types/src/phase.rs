//! Voting phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One voting round of the poll.
///
/// Every persisted key (tally, lock, velocity, seed) is scoped by phase so
/// that a device votes at most once per round, not once overall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// First round, one ballot per party. Strict majority or top-two runoff.
    Primary,
    /// Head-to-head between the primary's top two. Only exists when the
    /// primary produced no majority winner.
    Runoff,
    /// Final two-slot round across party lines. Plurality wins.
    General,
}

impl Phase {
    /// Stable lowercase key used in storage key paths and PoW contexts.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Runoff => "runoff",
            Self::General => "general",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
