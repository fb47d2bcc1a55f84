//! Velocity-spike and concentration checks.

use crate::velocity::VelocityLog;
use poll_types::{PollParams, Timestamp};
use std::collections::HashMap;
use tracing::info;

/// Evaluates tallies and the velocity log against configured thresholds.
///
/// Thresholds come straight from [`PollParams`]; the detector holds no
/// other state.
pub struct AnomalyDetector {
    window_secs: u64,
    spike_multiplier: u64,
    spike_min_absolute: u64,
    concentration_threshold_bps: u32,
    min_sample: u64,
}

impl AnomalyDetector {
    pub fn from_params(params: &PollParams) -> Self {
        Self {
            window_secs: params.velocity_window_secs,
            spike_multiplier: params.velocity_spike_multiplier,
            spike_min_absolute: params.velocity_min_absolute,
            concentration_threshold_bps: params.concentration_threshold_bps,
            min_sample: params.min_sample_floor,
        }
    }

    /// Run all checks. Returns human-readable flags; empty means clean.
    pub fn detect(
        &self,
        tallies: &HashMap<String, u64>,
        log: &VelocityLog,
        now: Timestamp,
    ) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(flag) = self.velocity_spike(log, now) {
            flags.push(flag);
        }
        if let Some(flag) = self.concentration(tallies) {
            flags.push(flag);
        }
        for flag in &flags {
            info!(flag, "anomaly flagged");
        }
        flags
    }

    /// Flag when the recent window is a configured multiple of the prior
    /// one and clears the absolute floor.
    fn velocity_spike(&self, log: &VelocityLog, now: Timestamp) -> Option<String> {
        let w = self.window_secs;
        let recent = log.count_in_window(now, 0, w);
        let prior = log.count_in_window(now, w, 2 * w);
        if prior > 0 && recent > self.spike_multiplier * prior && recent > self.spike_min_absolute {
            let minutes = w / 60;
            return Some(format!(
                "Velocity spike: {recent} votes in the last {minutes} minutes vs {prior} in the prior {minutes} minutes."
            ));
        }
        None
    }

    /// Flag when one candidate's share exceeds the threshold, once the
    /// total clears the minimum sample floor.
    fn concentration(&self, tallies: &HashMap<String, u64>) -> Option<String> {
        let total: u64 = tallies.values().sum();
        if total < self.min_sample {
            return None;
        }
        let max = tallies.values().copied().max().unwrap_or(0);
        let share_bps = (max as u128 * 10_000 / total as u128) as u32;
        if share_bps > self.concentration_threshold_bps {
            return Some(format!(
                "Extreme concentration: one candidate holds {}% of all {total} votes. May reflect coordinated activity.",
                share_bps / 100
            ));
        }
        None
    }
}
