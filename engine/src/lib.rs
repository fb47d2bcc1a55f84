//! Session orchestration for the straw poll.
//!
//! Ties the lower crates together into one per-device [`PollEngine`]:
//! the explicit phase state machine, the residency gate, dedup locks,
//! the vote-commit pipeline, session restore, result assembly with
//! sample suppression, and JSON export.

pub mod dedup;
pub mod engine;
pub mod error;
pub mod export;
pub mod machine;
pub mod residency;
pub mod session;

pub use dedup::{DedupLockManager, LockCheck, LockIntegrity};
pub use engine::{PollEngine, PollRoster, ResultsReport, VoteReceipt};
pub use error::VoteError;
pub use export::{ExportDocument, ExportRow, PhaseExport, PhaseResults};
pub use machine::{MachineError, PhaseMachine, PhaseState, PollEvent};
pub use residency::{ResidencyCheck, ZipRangeCheck};
pub use session::SessionRecord;
