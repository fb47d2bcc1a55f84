//! Participation tiers: sample-size labels attached to every result view.
//!
//! Below the `Collecting` boundary results are suppressed entirely; the
//! other tiers only change the label shown alongside the numbers.

use serde::{Deserialize, Serialize};

/// Sample-size tier for a phase's total vote count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipationTier {
    /// Fewer than 50 votes. Results suppressed.
    Collecting,
    /// 50–199 votes. Highly volatile.
    Early,
    /// 200–499 votes.
    Limited,
    /// 500–999 votes.
    Active,
    /// 1000+ votes.
    Established,
}

impl ParticipationTier {
    /// Classify a total vote count.
    pub fn for_total(total: u64) -> Self {
        match total {
            0..=49 => Self::Collecting,
            50..=199 => Self::Early,
            200..=499 => Self::Limited,
            500..=999 => Self::Active,
            _ => Self::Established,
        }
    }

    /// Whether results at this tier may be displayed at all.
    pub fn show(&self) -> bool {
        !matches!(self, Self::Collecting)
    }

    /// Human-readable label for result views and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Collecting => "Collecting Data",
            Self::Early => "Early Signal",
            Self::Limited => "Limited Signal",
            Self::Active => "Active Signal",
            Self::Established => "Established",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(ParticipationTier::for_total(0), ParticipationTier::Collecting);
        assert_eq!(ParticipationTier::for_total(49), ParticipationTier::Collecting);
        assert_eq!(ParticipationTier::for_total(50), ParticipationTier::Early);
        assert_eq!(ParticipationTier::for_total(199), ParticipationTier::Early);
        assert_eq!(ParticipationTier::for_total(200), ParticipationTier::Limited);
        assert_eq!(ParticipationTier::for_total(500), ParticipationTier::Active);
        assert_eq!(ParticipationTier::for_total(1000), ParticipationTier::Established);
    }

    #[test]
    fn only_collecting_is_suppressed() {
        assert!(!ParticipationTier::Collecting.show());
        assert!(ParticipationTier::Early.show());
        assert!(ParticipationTier::Established.show());
    }
}
