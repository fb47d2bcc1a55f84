//! Hashing primitives for the poll engine.
//!
//! One hash everywhere: 256-bit Blake2b. Fingerprints, shuffle streams, and
//! proof-of-work all build on these two functions.

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, hex_digest};
