//! Namespaced storage key scheme.
//!
//! Every key is prefixed with the poll namespace so rotating the namespace
//! for a new cycle makes old data unreachable without deleting anything.

use poll_types::{Party, Phase};

/// Builder for the fixed key layout:
///
/// ```text
/// {ns}:tally:{phase}:{candidateId}
/// {ns}:lock:{phase}:{fingerprintPrefix}
/// {ns}:vel:{phase}
/// {ns}:session
/// {ns}:seed:{phase}:{party}
/// {ns}:salt
/// ```
#[derive(Clone, Debug)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Per-candidate vote counter.
    pub fn tally(&self, phase: Phase, candidate_id: &str) -> String {
        format!("{}:tally:{}:{}", self.namespace, phase.key(), candidate_id)
    }

    /// Dedup lock marker for one device in one phase.
    pub fn lock(&self, phase: Phase, fingerprint_prefix: &str) -> String {
        format!("{}:lock:{}:{}", self.namespace, phase.key(), fingerprint_prefix)
    }

    /// Velocity timestamp log for one phase.
    pub fn velocity(&self, phase: Phase) -> String {
        format!("{}:vel:{}", self.namespace, phase.key())
    }

    /// Device-local session record.
    pub fn session(&self) -> String {
        format!("{}:session", self.namespace)
    }

    /// Persisted shuffle seed for one phase/party ballot.
    pub fn seed(&self, phase: Phase, party: Party) -> String {
        format!("{}:seed:{}:{}", self.namespace, phase.key(), party.key())
    }

    /// Persisted fingerprint salt.
    pub fn salt(&self) -> String {
        format!("{}:salt", self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespace_scoped() {
        let a = KeySpace::new("race_a");
        let b = KeySpace::new("race_b");
        assert_eq!(a.tally(Phase::Primary, "c1"), "race_a:tally:primary:c1");
        assert_ne!(
            a.tally(Phase::Primary, "c1"),
            b.tally(Phase::Primary, "c1")
        );
        assert_eq!(a.lock(Phase::Runoff, "abcd"), "race_a:lock:runoff:abcd");
        assert_eq!(a.velocity(Phase::General), "race_a:vel:general");
        assert_eq!(a.session(), "race_a:session");
        assert_eq!(a.seed(Phase::Primary, Party::B), "race_a:seed:primary:b");
        assert_eq!(a.salt(), "race_a:salt");
    }
}
