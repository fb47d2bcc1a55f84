//! Candidates and parties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides contesting the poll.
///
/// The roster for each party is fixed at configuration time, before the
/// poll opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    A,
    B,
}

impl Party {
    /// Stable lowercase key used in storage key paths.
    pub fn key(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }

    /// The opposing party.
    pub fn opponent(&self) -> Party {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Synthetic candidate id for this party's slot on a general ballot.
    pub fn general_slot_id(&self) -> &'static str {
        match self {
            Self::A => "side_a",
            Self::B => "side_b",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "Party A"),
            Self::B => write!(f, "Party B"),
        }
    }
}

/// A candidate on a ballot. Immutable once configured.
///
/// The `id` is the stable key under which tallies and proof-of-work
/// challenges are scoped; it must be unique across the whole roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub party: Party,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, party: Party) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            party,
        }
    }
}
