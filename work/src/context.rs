//! Challenge context: what a PoW solution commits to.

use poll_types::Phase;

/// The preimage prefix for one vote's PoW search.
///
/// Rendered as `{namespace}:{phase}:{candidateId}:` so that solutions are
/// worthless for any other namespace, phase, or candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkContext {
    prefix: String,
}

impl WorkContext {
    pub fn new(namespace: &str, phase: Phase, candidate_id: &str) -> Self {
        Self {
            prefix: format!("{}:{}:{}:", namespace, phase.key(), candidate_id),
        }
    }

    /// Full preimage for a given nonce.
    pub fn preimage(&self, nonce: u64) -> Vec<u8> {
        let mut bytes = self.prefix.as_bytes().to_vec();
        bytes.extend_from_slice(nonce.to_string().as_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_binds_all_three_parts() {
        let base = WorkContext::new("ns", Phase::Primary, "c1");
        assert_ne!(base, WorkContext::new("ns2", Phase::Primary, "c1"));
        assert_ne!(base, WorkContext::new("ns", Phase::Runoff, "c1"));
        assert_ne!(base, WorkContext::new("ns", Phase::Primary, "c2"));
    }

    #[test]
    fn preimage_includes_nonce() {
        let ctx = WorkContext::new("ns", Phase::General, "side_a");
        assert_eq!(ctx.preimage(42), b"ns:general:side_a:42".to_vec());
    }
}
