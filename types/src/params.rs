//! Poll parameters: every tunable the engine consumes, in one place.
//!
//! The namespace and thresholds are threaded into each component at
//! construction. Nothing reads global state, so several polls with
//! different namespaces can coexist in one process.

use serde::{Deserialize, Serialize};

/// Configuration for one poll deployment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollParams {
    /// Identifier scoping every storage key to one election cycle.
    /// Rotate it for a new race; old data becomes unreachable, not deleted.
    pub namespace: String,

    // ── Display / suppression ────────────────────────────────────────────
    /// Minimum total votes before any outcome or ranking is displayed.
    pub min_sample_floor: u64,

    // ── Anti-abuse ───────────────────────────────────────────────────────
    /// Required leading zero bits in the proof-of-work digest.
    /// 14 bits ≈ 100–500 ms of search on commodity hardware.
    pub work_difficulty_bits: u32,

    /// Length of the fingerprint prefix used in dedup lock keys.
    pub fingerprint_prefix_len: usize,

    // ── Anomaly detection ────────────────────────────────────────────────
    /// Velocity window length W in seconds. "Recent" is age < W,
    /// "prior" is W ≤ age < 2W.
    pub velocity_window_secs: u64,

    /// Spike multiplier k: flag when recent > k · prior.
    pub velocity_spike_multiplier: u64,

    /// Absolute floor: a spike is only flagged when the recent count also
    /// exceeds this, so tiny numbers never trip the detector.
    pub velocity_min_absolute: u64,

    /// Velocity log entries older than this are pruned on append.
    pub velocity_retention_secs: u64,

    /// Hard cap on retained velocity entries.
    pub velocity_max_entries: usize,

    /// Concentration threshold in basis points (9500 = 95%): flag when one
    /// candidate holds more than this share of the phase total.
    pub concentration_threshold_bps: u32,
}

impl PollParams {
    /// Straw-poll defaults, the configuration the original deployment ran.
    pub fn straw_poll_defaults(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),

            min_sample_floor: 50,

            work_difficulty_bits: 14,
            fingerprint_prefix_len: 16,

            velocity_window_secs: 600,      // 10 minutes
            velocity_spike_multiplier: 5,
            velocity_min_absolute: 15,
            velocity_retention_secs: 7200,  // 2 hours
            velocity_max_entries: 4096,

            concentration_threshold_bps: 9500, // 95%
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let p = PollParams::straw_poll_defaults("test2026");
        assert_eq!(p.namespace, "test2026");
        assert!(p.min_sample_floor > 0);
        assert!(p.velocity_retention_secs >= 2 * p.velocity_window_secs);
        assert!(p.concentration_threshold_bps <= 10_000);
    }
}
