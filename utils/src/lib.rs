//! Shared utilities for the poll engine.

pub mod logging;

pub use logging::init_tracing;
