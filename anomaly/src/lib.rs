//! Statistical anomaly detection.
//!
//! Advisory only: the detector never mutates state and never blocks a
//! vote. Flags are human-readable strings rendered alongside results.

pub mod detector;
pub mod velocity;

pub use detector::AnomalyDetector;
pub use velocity::VelocityLog;
