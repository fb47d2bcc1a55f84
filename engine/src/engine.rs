//! Vote-commit orchestration.
//!
//! One [`PollEngine`] per device session. The commit pipeline is strictly
//! ordered: fingerprint, lock check, proof-of-work, atomic tally increment,
//! velocity append, lock acquisition, session record, phase transition.
//! The increment is the commit point. Everything before it leaves no trace
//! on failure; everything after it is advisory or lock bookkeeping and
//! degrades rather than un-counting the vote.

use poll_anomaly::{AnomalyDetector, VelocityLog};
use poll_ballot::BallotManager;
use poll_fingerprint::{DeviceSignals, Fingerprint, FingerprintGenerator};
use poll_store::{KeySpace, StorageAdapter};
use poll_tally::{
    compute_general_outcome, compute_primary_outcome, compute_runoff_outcome, OutcomeStatus,
    ResultsDisplay, TallyEngine,
};
use poll_types::{Candidate, Party, Phase, PollParams, Timestamp};
use poll_work::{CancelToken, WorkContext, WorkGenerator};
use std::sync::Arc;
use tracing::{info, warn};

use crate::dedup::{DedupLockManager, LockIntegrity};
use crate::error::VoteError;
use crate::export::{ExportDocument, PhaseExport};
use crate::machine::{PhaseMachine, PhaseState, PollEvent};
use crate::residency::ResidencyCheck;
use crate::session::SessionRecord;

/// The configured candidate lineup, one slate per party.
#[derive(Clone, Debug)]
pub struct PollRoster {
    party_a: Vec<Candidate>,
    party_b: Vec<Candidate>,
}

impl PollRoster {
    pub fn new(party_a: Vec<Candidate>, party_b: Vec<Candidate>) -> Self {
        Self { party_a, party_b }
    }

    pub fn for_party(&self, party: Party) -> &[Candidate] {
        match party {
            Party::A => &self.party_a,
            Party::B => &self.party_b,
        }
    }
}

/// What a successful submission reports back.
#[derive(Clone, Debug)]
pub struct VoteReceipt {
    pub phase: Phase,
    pub candidate_id: String,
    /// The tally value after this vote, straight from the atomic add.
    pub count: u64,
    /// The state the session advanced to.
    pub state: PhaseState,
    /// True when dedup for this session is running on local evidence only.
    pub degraded_integrity: bool,
}

/// Everything the results view needs, assembled on demand.
#[derive(Clone, Debug)]
pub struct ResultsReport {
    pub primary: ResultsDisplay,
    pub runoff: Option<ResultsDisplay>,
    pub general: Option<ResultsDisplay>,
    pub anomaly_flags: Vec<String>,
    pub degraded_integrity: bool,
}

/// One device's session against the poll.
pub struct PollEngine {
    params: PollParams,
    roster: PollRoster,
    signals: DeviceSignals,
    store: Arc<dyn StorageAdapter>,
    keys: KeySpace,
    machine: PhaseMachine,
    tally: TallyEngine,
    ballots: BallotManager,
    fingerprints: FingerprintGenerator,
    fingerprint: Option<Fingerprint>,
    locks: DedupLockManager,
    detector: AnomalyDetector,
    work: WorkGenerator,
    session: SessionRecord,
    degraded: bool,
}

impl PollEngine {
    pub fn new(
        params: PollParams,
        roster: PollRoster,
        signals: DeviceSignals,
        store: Arc<dyn StorageAdapter>,
    ) -> Self {
        let keys = KeySpace::new(&params.namespace);
        Self {
            tally: TallyEngine::new(Arc::clone(&store), keys.clone()),
            ballots: BallotManager::new(Arc::clone(&store), keys.clone()),
            fingerprints: FingerprintGenerator::new(Arc::clone(&store), keys.clone()),
            locks: DedupLockManager::new(
                Arc::clone(&store),
                keys.clone(),
                params.fingerprint_prefix_len,
            ),
            detector: AnomalyDetector::from_params(&params),
            work: WorkGenerator::new(params.work_difficulty_bits),
            machine: PhaseMachine::new(),
            fingerprint: None,
            session: SessionRecord::default(),
            degraded: false,
            keys,
            store,
            signals,
            roster,
            params,
        }
    }

    pub fn state(&self) -> PhaseState {
        self.machine.state()
    }

    pub fn session(&self) -> &SessionRecord {
        &self.session
    }

    pub fn degraded_integrity(&self) -> bool {
        self.degraded
    }

    /// Restore a previously completed session from device storage.
    ///
    /// Returns `true` and jumps to `Results` when a restorable record
    /// exists; otherwise leaves the machine where it is.
    pub fn restore_session(&mut self) -> Result<bool, VoteError> {
        match SessionRecord::load(self.store.as_ref(), &self.keys)? {
            Some(record) if record.is_restorable() => {
                info!("restoring completed session");
                self.session = record;
                self.machine.transition(PollEvent::SessionRestored)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Run the residency gate. The input is validated but never persisted.
    pub fn verify_residency(
        &mut self,
        check: &dyn ResidencyCheck,
        input: &str,
    ) -> Result<PhaseState, VoteError> {
        if self.machine.state() != PhaseState::Verify {
            return Err(VoteError::Validation(format!(
                "residency is not open in state {}",
                self.machine.state()
            )));
        }
        if !check.admits(input) {
            return Err(VoteError::Validation(
                "residency check failed".to_string(),
            ));
        }
        Ok(self.machine.transition(PollEvent::ResidencyVerified)?)
    }

    /// Choose a party and receive its shuffled primary ballot.
    pub fn select_party(&mut self, party: Party) -> Result<Vec<Candidate>, VoteError> {
        if self.machine.state() != PhaseState::PartySelect {
            return Err(VoteError::Validation(format!(
                "party selection is not open in state {}",
                self.machine.state()
            )));
        }
        let ballot = self
            .ballots
            .ballot_for(Phase::Primary, party, self.roster.for_party(party))?;
        self.session.party = Some(party);
        self.persist_session();
        self.machine.transition(PollEvent::PartySelected)?;
        Ok(ballot)
    }

    /// The ballot for the currently open vote, in display order.
    pub fn current_ballot(&self) -> Result<Vec<Candidate>, VoteError> {
        let party = self.party()?;
        match self.machine.state() {
            PhaseState::PrimaryVote => Ok(self.ballots.ballot_for(
                Phase::Primary,
                party,
                self.roster.for_party(party),
            )?),
            PhaseState::RunoffVote => {
                let pair = self.candidates_for(Phase::Runoff)?;
                Ok(self.ballots.ballot_for(Phase::Runoff, party, &pair)?)
            }
            // Synthesized in display order when the routing froze it.
            PhaseState::GeneralVote => self.candidates_for(Phase::General),
            state => Err(VoteError::Validation(format!(
                "no ballot is open in state {state}"
            ))),
        }
    }

    /// Commit one vote through the full pipeline.
    pub async fn submit_vote(
        &mut self,
        candidate_id: &str,
        cancel: &CancelToken,
        now: Timestamp,
    ) -> Result<VoteReceipt, VoteError> {
        let phase = match self.machine.state() {
            PhaseState::PrimaryVote => Phase::Primary,
            PhaseState::RunoffVote => Phase::Runoff,
            PhaseState::GeneralVote => Phase::General,
            state => {
                return Err(VoteError::Validation(format!(
                    "no vote is open in state {state}"
                )))
            }
        };
        let candidates = self.candidates_for(phase)?;
        let chosen = candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .cloned()
            .ok_or_else(|| {
                VoteError::Validation(format!(
                    "candidate {candidate_id:?} is not on the {phase} ballot"
                ))
            })?;

        // Voting is blocked outright when the device cannot be
        // fingerprinted.
        let fingerprint = self.device_fingerprint()?;

        let check = self.locks.is_locked(phase, &fingerprint)?;
        if check.degraded {
            self.degraded = true;
        }
        if check.locked {
            return Err(VoteError::AlreadyVoted { phase });
        }

        // The throttle runs before any write, so cancellation and storage
        // failure during the search leave nothing behind.
        let context = WorkContext::new(&self.params.namespace, phase, &chosen.id);
        let nonce = self.work.generate(&context, cancel).await?;

        // Commit point. A failure here surfaces as a storage error with no
        // lock written and no state advance; retrying is safe.
        let count = self.tally.increment(phase, &chosen.id)?;

        self.append_velocity(phase, now);

        // Lock after the durable count. A device that crashes in between
        // could vote twice; a lock without a counted vote would instead
        // silently drop a voter.
        match self.locks.acquire(phase, &fingerprint, nonce.0) {
            Ok(LockIntegrity::Full) => {}
            Ok(LockIntegrity::LocalOnly) => self.degraded = true,
            Err(err) => {
                warn!(%phase, error = %err, "vote counted but no dedup lock recorded");
                self.degraded = true;
            }
        }

        self.record_vote(phase, &chosen.id);
        self.persist_session();

        let event = self.route_after_vote(phase, &candidates, &chosen)?;
        let state = self.machine.transition(event)?;
        info!(%phase, candidate_id = %chosen.id, count, %state, "vote committed");

        Ok(VoteReceipt {
            phase,
            candidate_id: chosen.id,
            count,
            state,
            degraded_integrity: self.degraded,
        })
    }

    /// Assemble the full results view from current tallies.
    pub fn results(&self, now: Timestamp) -> Result<ResultsReport, VoteError> {
        let party = self.party()?;
        let floor = self.params.min_sample_floor;

        let primary_candidates = self.roster.for_party(party);
        let primary_tallies = self.tally.load(Phase::Primary, primary_candidates)?;
        let primary = ResultsDisplay::from_outcome(
            compute_primary_outcome(&primary_tallies, primary_candidates),
            floor,
        );
        let mut anomaly_flags =
            self.detect_anomalies(Phase::Primary, &primary_tallies, now)?;

        let runoff = match &self.session.runoff_candidates {
            Some(pair) => {
                let tallies = self.tally.load(Phase::Runoff, pair)?;
                anomaly_flags.extend(self.detect_anomalies(Phase::Runoff, &tallies, now)?);
                Some(ResultsDisplay::from_outcome(
                    compute_runoff_outcome(&tallies, pair),
                    floor,
                ))
            }
            None => None,
        };

        let general = match &self.session.general_candidates {
            Some(slots) => {
                let tallies = self.tally.load(Phase::General, slots)?;
                anomaly_flags.extend(self.detect_anomalies(Phase::General, &tallies, now)?);
                Some(ResultsDisplay::from_outcome(
                    compute_general_outcome(&tallies, slots),
                    floor,
                ))
            }
            None => None,
        };

        Ok(ResultsReport {
            primary,
            runoff,
            general,
            anomaly_flags,
            degraded_integrity: self.degraded,
        })
    }

    /// Snapshot the results view as a self-describing JSON document.
    pub fn export(&self, now: Timestamp) -> Result<ExportDocument, VoteError> {
        let report = self.results(now)?;
        let mut phases = vec![PhaseExport::from_display(Phase::Primary, &report.primary)];
        if let Some(runoff) = &report.runoff {
            phases.push(PhaseExport::from_display(Phase::Runoff, runoff));
        }
        if let Some(general) = &report.general {
            phases.push(PhaseExport::from_display(Phase::General, general));
        }
        Ok(ExportDocument::new(
            now,
            self.params.namespace.clone(),
            report.degraded_integrity,
            report.anomaly_flags,
            phases,
        ))
    }

    fn party(&self) -> Result<Party, VoteError> {
        self.session
            .party
            .ok_or_else(|| VoteError::Validation("no party selected".to_string()))
    }

    fn device_fingerprint(&mut self) -> Result<Fingerprint, VoteError> {
        match &self.fingerprint {
            Some(fp) => Ok(fp.clone()),
            None => {
                let fp = self.fingerprints.compute(&self.signals)?;
                self.fingerprint = Some(fp.clone());
                Ok(fp)
            }
        }
    }

    fn candidates_for(&self, phase: Phase) -> Result<Vec<Candidate>, VoteError> {
        match phase {
            Phase::Primary => Ok(self.roster.for_party(self.party()?).to_vec()),
            Phase::Runoff => self
                .session
                .runoff_candidates
                .clone()
                .ok_or_else(|| VoteError::Validation("no runoff ballot exists".to_string())),
            Phase::General => self
                .session
                .general_candidates
                .clone()
                .ok_or_else(|| VoteError::Validation("no general ballot exists".to_string())),
        }
    }

    fn record_vote(&mut self, phase: Phase, candidate_id: &str) {
        let slot = match phase {
            Phase::Primary => &mut self.session.primary_vote,
            Phase::Runoff => &mut self.session.runoff_vote,
            Phase::General => &mut self.session.general_vote,
        };
        *slot = Some(candidate_id.to_string());
    }

    /// Decide where the walk goes after a committed vote, freezing the next
    /// ballot as a side effect.
    ///
    /// Routing reads the outcome as of this voter's own submission. For the
    /// primary, a strict majority (or any terminal status) skips the runoff;
    /// everything else routes through it.
    fn route_after_vote(
        &mut self,
        phase: Phase,
        candidates: &[Candidate],
        chosen: &Candidate,
    ) -> Result<PollEvent, VoteError> {
        match phase {
            Phase::Primary => {
                let tallies = self.tally.load(Phase::Primary, candidates)?;
                let outcome = compute_primary_outcome(&tallies, candidates);
                if let (OutcomeStatus::Runoff, Some(top_two)) = (outcome.status, outcome.top_two) {
                    self.session.runoff_candidates = Some(top_two.to_vec());
                    self.persist_session();
                    Ok(PollEvent::PrimaryVoteAccepted { runoff: true })
                } else {
                    self.freeze_general_ballot(chosen)?;
                    Ok(PollEvent::PrimaryVoteAccepted { runoff: false })
                }
            }
            Phase::Runoff => {
                self.freeze_general_ballot(chosen)?;
                Ok(PollEvent::RunoffVoteAccepted)
            }
            Phase::General => Ok(PollEvent::GeneralVoteAccepted),
        }
    }

    /// Synthesize the two-slot general ballot: the voter's own choice on
    /// their side, a placeholder nominee on the other, shuffled once and
    /// frozen in the session.
    fn freeze_general_ballot(&mut self, chosen: &Candidate) -> Result<(), VoteError> {
        let own = chosen.party;
        let opponent = own.opponent();
        let slots = vec![
            Candidate::new(own.general_slot_id(), chosen.name.clone(), own),
            Candidate::new(
                opponent.general_slot_id(),
                format!("{opponent} Nominee"),
                opponent,
            ),
        ];
        let ordered = self.ballots.ballot_for(Phase::General, own, &slots)?;
        self.session.general_candidates = Some(ordered);
        self.persist_session();
        Ok(())
    }

    /// Append to the phase's velocity log. Advisory data: failures are
    /// logged and never fail a vote that has already been counted.
    fn append_velocity(&mut self, phase: Phase, now: Timestamp) {
        let key = self.keys.velocity(phase);
        let result = VelocityLog::load(self.store.as_ref(), &key).and_then(|mut log| {
            log.append(
                now,
                self.params.velocity_retention_secs,
                self.params.velocity_max_entries,
            );
            log.save(self.store.as_ref(), &key)
        });
        if let Err(err) = result {
            warn!(%phase, error = %err, "velocity log update failed");
        }
    }

    fn detect_anomalies(
        &self,
        phase: Phase,
        tallies: &std::collections::HashMap<String, u64>,
        now: Timestamp,
    ) -> Result<Vec<String>, VoteError> {
        let log = VelocityLog::load(self.store.as_ref(), &self.keys.velocity(phase))?;
        Ok(self
            .detector
            .detect(tallies, &log, now)
            .into_iter()
            .map(|flag| format!("{phase}: {flag}"))
            .collect())
    }

    /// Session persistence is device-local convenience; a write failure
    /// must not fail the vote pipeline.
    fn persist_session(&self) {
        if let Err(err) = self.session.save(self.store.as_ref(), &self.keys) {
            warn!(error = %err, "session record write failed");
        }
    }
}
