//! PoW generation: a single cooperative, cancellable search task.
//!
//! The search shares one execution context with the interactive session, so
//! it yields back to the scheduler every batch instead of spinning. Partial
//! work is discarded on cancellation with no side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{leading_zero_bits, WorkContext, WorkError, WorkNonce};
use poll_crypto::blake2b_256;

/// Nonces tried between cancellation checks and scheduler yields.
const BATCH_SIZE: u64 = 1024;

/// Cooperative cancellation handle for an in-flight search.
///
/// Clone it into whatever owns the submission UI; `cancel()` takes effect at
/// the next batch boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Generates proof-of-work for a vote submission.
#[derive(Clone, Copy, Debug)]
pub struct WorkGenerator {
    difficulty_bits: u32,
}

impl WorkGenerator {
    pub fn new(difficulty_bits: u32) -> Self {
        Self { difficulty_bits }
    }

    pub fn difficulty_bits(&self) -> u32 {
        self.difficulty_bits
    }

    /// Search for a nonce whose digest meets the difficulty.
    ///
    /// Incrementing counter from zero; yields every [`BATCH_SIZE`] nonces so
    /// the host scheduler stays responsive, and observes `cancel` at the
    /// same cadence.
    pub async fn generate(
        &self,
        context: &WorkContext,
        cancel: &CancelToken,
    ) -> Result<WorkNonce, WorkError> {
        if self.difficulty_bits == 0 {
            return Ok(WorkNonce(0));
        }

        let mut nonce: u64 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(WorkError::Cancelled);
            }

            let end = nonce.saturating_add(BATCH_SIZE);
            while nonce < end {
                let digest = blake2b_256(&context.preimage(nonce));
                if leading_zero_bits(&digest) >= self.difficulty_bits {
                    return Ok(WorkNonce(nonce));
                }
                nonce = nonce.wrapping_add(1);
            }

            tokio::task::yield_now().await;
        }
    }
}
