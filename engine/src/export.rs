//! JSON results export.
//!
//! A self-describing snapshot of whatever the results view would show,
//! including suppression markers and anomaly flags. Suppressed phases
//! export no per-candidate numbers, same as the live view.

use poll_tally::ResultsDisplay;
use poll_types::{Phase, Timestamp};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct ExportDocument {
    pub exported_at_secs: u64,
    pub namespace: String,
    /// True when any dedup lock this session exists in local scope only.
    pub degraded_integrity: bool,
    pub anomaly_flags: Vec<String>,
    pub phases: Vec<PhaseExport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PhaseExport {
    pub phase: Phase,
    pub total: u64,
    #[serde(flatten)]
    pub results: PhaseResults,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseResults {
    /// Below the sample floor. No counts, no ranking, no leader.
    Suppressed { floor: u64 },
    Shown { tier: String, rows: Vec<ExportRow> },
}

#[derive(Clone, Debug, Serialize)]
pub struct ExportRow {
    pub id: String,
    pub name: String,
    pub votes: u64,
    pub pct: f64,
}

impl PhaseExport {
    pub fn from_display(phase: Phase, display: &ResultsDisplay) -> Self {
        match display {
            ResultsDisplay::Suppressed { total, floor } => Self {
                phase,
                total: *total,
                results: PhaseResults::Suppressed { floor: *floor },
            },
            ResultsDisplay::Shown { outcome, tier } => Self {
                phase,
                total: outcome.total,
                results: PhaseResults::Shown {
                    tier: tier.label().to_string(),
                    rows: outcome
                        .ranked
                        .iter()
                        .map(|r| ExportRow {
                            id: r.candidate.id.clone(),
                            name: r.candidate.name.clone(),
                            votes: r.votes,
                            pct: r.pct,
                        })
                        .collect(),
                },
            },
        }
    }
}

impl ExportDocument {
    pub fn new(
        exported_at: Timestamp,
        namespace: impl Into<String>,
        degraded_integrity: bool,
        anomaly_flags: Vec<String>,
        phases: Vec<PhaseExport>,
    ) -> Self {
        Self {
            exported_at_secs: exported_at.as_secs(),
            namespace: namespace.into(),
            degraded_integrity,
            anomaly_flags,
            phases,
        }
    }

    pub fn to_json(&self) -> String {
        // Serialization of these owned structs cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
