//! Nullable infrastructure for deterministic testing.
//!
//! External effects (time, storage failure modes) are abstracted so tests
//! control them programmatically: time only advances when told to, and the
//! flaky store fails exactly the scopes a test disables.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::FlakyStore;
