//! Phase outcome computation.
//!
//! Derived from current tallies on demand; never persisted. Majority is
//! strict and count-based, `floor(total/2) + 1`, so small-n percentage
//! rounding can never manufacture or deny a winner.

use poll_types::{Candidate, ParticipationTier};
use serde::Serialize;
use std::collections::HashMap;

/// Where a phase stands given its current tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    /// No votes recorded yet.
    NoVotes,
    /// The leader cleared the phase's win condition.
    Winner,
    /// No majority; the top two advance to a runoff.
    Runoff,
    /// No majority and fewer than two candidates to run off between.
    RunoffUnavailable,
    /// Two-way phase with exactly equal counts. Nobody is silently picked;
    /// the tie is surfaced as its own terminal condition.
    Tied,
}

/// One row of a ranked outcome.
#[derive(Clone, Debug, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub votes: u64,
    /// Share of the phase total, for display only. Win conditions never
    /// consult this.
    pub pct: f64,
}

/// A derived phase outcome.
#[derive(Clone, Debug, Serialize)]
pub struct PhaseOutcome {
    pub status: OutcomeStatus,
    pub total: u64,
    /// Candidates ranked by votes descending, ties broken by lexical id.
    pub ranked: Vec<RankedCandidate>,
    pub winner: Option<Candidate>,
    /// Present only when `status == Runoff`.
    pub top_two: Option<[Candidate; 2]>,
}

impl PhaseOutcome {
    fn empty() -> Self {
        Self {
            status: OutcomeStatus::NoVotes,
            total: 0,
            ranked: Vec::new(),
            winner: None,
            top_two: None,
        }
    }
}

/// Rank candidates by votes descending.
///
/// Ties break on lexical candidate id, a deterministic rule inherited from
/// the original deployment and kept for reproducibility; it is not a
/// validated fairness policy.
fn rank(tallies: &HashMap<String, u64>, candidates: &[Candidate], total: u64) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|c| {
            let votes = tallies.get(&c.id).copied().unwrap_or(0);
            RankedCandidate {
                candidate: c.clone(),
                votes,
                pct: if total > 0 {
                    (votes as f64 / total as f64) * 100.0
                } else {
                    0.0
                },
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
    ranked
}

fn total_for(tallies: &HashMap<String, u64>, candidates: &[Candidate]) -> u64 {
    candidates
        .iter()
        .map(|c| tallies.get(&c.id).copied().unwrap_or(0))
        .sum()
}

/// Strict count-based majority threshold.
fn majority(total: u64) -> u64 {
    total / 2 + 1
}

/// Primary outcome: strict majority wins, otherwise the top two advance.
pub fn compute_primary_outcome(
    tallies: &HashMap<String, u64>,
    candidates: &[Candidate],
) -> PhaseOutcome {
    let total = total_for(tallies, candidates);
    if total == 0 {
        return PhaseOutcome::empty();
    }
    let ranked = rank(tallies, candidates, total);

    if ranked[0].votes >= majority(total) {
        let winner = ranked[0].candidate.clone();
        return PhaseOutcome {
            status: OutcomeStatus::Winner,
            total,
            ranked,
            winner: Some(winner),
            top_two: None,
        };
    }
    if ranked.len() < 2 {
        return PhaseOutcome {
            status: OutcomeStatus::RunoffUnavailable,
            total,
            ranked,
            winner: None,
            top_two: None,
        };
    }
    let top_two = [ranked[0].candidate.clone(), ranked[1].candidate.clone()];
    PhaseOutcome {
        status: OutcomeStatus::Runoff,
        total,
        ranked,
        winner: None,
        top_two: Some(top_two),
    }
}

/// Runoff outcome over exactly two candidates: strictly more votes wins.
///
/// An exact tie yields `Tied` with no winner.
pub fn compute_runoff_outcome(
    tallies: &HashMap<String, u64>,
    top_two: &[Candidate],
) -> PhaseOutcome {
    let total = total_for(tallies, top_two);
    if total == 0 {
        return PhaseOutcome::empty();
    }
    let ranked = rank(tallies, top_two, total);

    if ranked.len() >= 2 && ranked[0].votes == ranked[1].votes {
        return PhaseOutcome {
            status: OutcomeStatus::Tied,
            total,
            ranked,
            winner: None,
            top_two: None,
        };
    }
    let winner = ranked[0].candidate.clone();
    PhaseOutcome {
        status: OutcomeStatus::Winner,
        total,
        ranked,
        winner: Some(winner),
        top_two: None,
    }
}

/// General-election outcome: plurality, no majority requirement.
pub fn compute_general_outcome(
    tallies: &HashMap<String, u64>,
    candidates: &[Candidate],
) -> PhaseOutcome {
    compute_runoff_outcome(tallies, candidates)
}

/// A display-ready view of an outcome, with sample suppression applied.
#[derive(Clone, Debug, Serialize)]
pub enum ResultsDisplay {
    /// Total is below the minimum sample floor: no outcome or ranking is
    /// shown, however lopsided the partial tally.
    Suppressed { total: u64, floor: u64 },
    Shown {
        outcome: PhaseOutcome,
        tier: ParticipationTier,
    },
}

impl ResultsDisplay {
    pub fn from_outcome(outcome: PhaseOutcome, floor: u64) -> Self {
        if outcome.total < floor {
            Self::Suppressed {
                total: outcome.total,
                floor,
            }
        } else {
            let tier = ParticipationTier::for_total(outcome.total);
            Self::Shown { outcome, tier }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_types::Party;

    fn cands(ids: &[&str]) -> Vec<Candidate> {
        ids.iter()
            .map(|id| Candidate::new(*id, id.to_uppercase(), Party::A))
            .collect()
    }

    fn tallies(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn strict_majority_wins() {
        // total 5, majority 3, a clears it.
        let outcome = compute_primary_outcome(&tallies(&[("a", 3), ("b", 2)]), &cands(&["a", "b"]));
        assert_eq!(outcome.status, OutcomeStatus::Winner);
        assert_eq!(outcome.winner.unwrap().id, "a");
        assert_eq!(outcome.total, 5);
    }

    #[test]
    fn even_split_triggers_runoff_with_id_tiebreak() {
        // total 4, majority 3, neither clears it; tie order resolved by id.
        let outcome = compute_primary_outcome(&tallies(&[("a", 2), ("b", 2)]), &cands(&["b", "a"]));
        assert_eq!(outcome.status, OutcomeStatus::Runoff);
        let top_two = outcome.top_two.unwrap();
        assert_eq!(top_two[0].id, "a");
        assert_eq!(top_two[1].id, "b");
    }

    #[test]
    fn no_votes_status() {
        let outcome = compute_primary_outcome(&HashMap::new(), &cands(&["a", "b"]));
        assert_eq!(outcome.status, OutcomeStatus::NoVotes);
        assert_eq!(outcome.total, 0);
        assert!(outcome.ranked.is_empty());
    }

    #[test]
    fn single_candidate_clears_majority_outright() {
        let outcome = compute_primary_outcome(&tallies(&[("a", 1)]), &cands(&["a"]));
        assert_eq!(outcome.status, OutcomeStatus::Winner);
    }

    #[test]
    fn exact_half_is_not_a_majority() {
        // total 6, majority 4; leader holds exactly half.
        let outcome =
            compute_primary_outcome(&tallies(&[("a", 3), ("b", 2), ("c", 1)]), &cands(&["a", "b", "c"]));
        assert_eq!(outcome.status, OutcomeStatus::Runoff);
    }

    #[test]
    fn runoff_strictly_more_wins() {
        let outcome = compute_runoff_outcome(&tallies(&[("a", 6), ("b", 5)]), &cands(&["a", "b"]));
        assert_eq!(outcome.status, OutcomeStatus::Winner);
        assert_eq!(outcome.winner.unwrap().id, "a");
    }

    #[test]
    fn runoff_true_tie_has_no_winner() {
        let outcome = compute_runoff_outcome(&tallies(&[("a", 5), ("b", 5)]), &cands(&["a", "b"]));
        assert_eq!(outcome.status, OutcomeStatus::Tied);
        assert!(outcome.winner.is_none());
    }

    #[test]
    fn general_is_plurality() {
        // 40% beats 35% and 25%; no majority needed.
        let outcome = compute_general_outcome(
            &tallies(&[("x", 40), ("y", 35), ("z", 25)]),
            &cands(&["x", "y", "z"]),
        );
        assert_eq!(outcome.status, OutcomeStatus::Winner);
        assert_eq!(outcome.winner.unwrap().id, "x");
    }

    #[test]
    fn ranking_is_deterministic_for_identical_inputs() {
        let t = tallies(&[("a", 2), ("b", 5), ("c", 2)]);
        let c = cands(&["a", "b", "c"]);
        let r1: Vec<String> = compute_primary_outcome(&t, &c)
            .ranked
            .iter()
            .map(|r| r.candidate.id.clone())
            .collect();
        let r2: Vec<String> = compute_primary_outcome(&t, &c)
            .ranked
            .iter()
            .map(|r| r.candidate.id.clone())
            .collect();
        assert_eq!(r1, vec!["b", "a", "c"]);
        assert_eq!(r1, r2);
    }

    #[test]
    fn suppression_below_floor_regardless_of_lopsidedness() {
        let outcome = compute_primary_outcome(&tallies(&[("a", 30), ("b", 1)]), &cands(&["a", "b"]));
        match ResultsDisplay::from_outcome(outcome, 50) {
            ResultsDisplay::Suppressed { total, floor } => {
                assert_eq!(total, 31);
                assert_eq!(floor, 50);
            }
            ResultsDisplay::Shown { .. } => panic!("must suppress below floor"),
        }
    }

    #[test]
    fn shown_at_or_above_floor_carries_tier() {
        let outcome = compute_primary_outcome(&tallies(&[("a", 40), ("b", 12)]), &cands(&["a", "b"]));
        match ResultsDisplay::from_outcome(outcome, 50) {
            ResultsDisplay::Shown { outcome, tier } => {
                assert_eq!(outcome.total, 52);
                assert_eq!(tier, ParticipationTier::Early);
            }
            ResultsDisplay::Suppressed { .. } => panic!("must show at floor"),
        }
    }
}
