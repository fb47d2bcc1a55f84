//! The phase state machine.
//!
//! Session flow is a single explicit object: a current [`PhaseState`] and a
//! `transition` that either returns the next state or rejects the event.
//! Nothing else in the engine moves the session forward, so "vote not
//! counted" and "phase advanced" can never disagree about which happened.

use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Where the session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseState {
    /// Residency gate. Nothing else is reachable until it passes.
    Verify,
    /// Choosing which party's primary ballot to vote on.
    PartySelect,
    /// Voting on the primary ballot.
    PrimaryVote,
    /// Voting on the runoff ballot. Entered only when the primary produced
    /// no majority winner.
    RunoffVote,
    /// Voting on the synthesized two-slot general ballot.
    GeneralVote,
    /// Terminal. Results viewing and export.
    Results,
}

impl fmt::Display for PhaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verify => "verify",
            Self::PartySelect => "party-select",
            Self::PrimaryVote => "primary-vote",
            Self::RunoffVote => "runoff-vote",
            Self::GeneralVote => "general-vote",
            Self::Results => "results",
        };
        f.write_str(name)
    }
}

/// An event that may advance the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollEvent {
    ResidencyVerified,
    PartySelected,
    /// A primary vote committed; `runoff` carries whether the resulting
    /// outcome routes through a runoff.
    PrimaryVoteAccepted { runoff: bool },
    RunoffVoteAccepted,
    GeneralVoteAccepted,
    /// A completed session was restored from device storage.
    SessionRestored,
}

impl fmt::Display for PollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResidencyVerified => "residency-verified",
            Self::PartySelected => "party-selected",
            Self::PrimaryVoteAccepted { .. } => "primary-vote-accepted",
            Self::RunoffVoteAccepted => "runoff-vote-accepted",
            Self::GeneralVoteAccepted => "general-vote-accepted",
            Self::SessionRestored => "session-restored",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("event {event} is not valid in state {state}")]
    Rejected { state: PhaseState, event: PollEvent },
}

/// Owns the current state; `transition` is the only mutator.
#[derive(Debug)]
pub struct PhaseMachine {
    state: PhaseState,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            state: PhaseState::Verify,
        }
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    /// Apply an event. On rejection the state is unchanged.
    pub fn transition(&mut self, event: PollEvent) -> Result<PhaseState, MachineError> {
        use PhaseState::*;
        use PollEvent::*;

        let next = match (self.state, event) {
            (Verify, ResidencyVerified) => PartySelect,
            (PartySelect, PartySelected) => PrimaryVote,
            (PrimaryVote, PrimaryVoteAccepted { runoff: true }) => RunoffVote,
            (PrimaryVote, PrimaryVoteAccepted { runoff: false }) => GeneralVote,
            (RunoffVote, RunoffVoteAccepted) => GeneralVote,
            (GeneralVote, GeneralVoteAccepted) => Results,
            // Restore may land from any state; the session record is the
            // evidence that the walk already happened.
            (_, SessionRestored) => Results,
            (state, event) => return Err(MachineError::Rejected { state, event }),
        };
        debug!(from = %self.state, to = %next, %event, "phase transition");
        self.state = next;
        Ok(next)
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}
