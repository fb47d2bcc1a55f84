//! PoW validation.

use crate::{leading_zero_bits, WorkContext, WorkNonce};
use poll_crypto::blake2b_256;

/// Validate that a nonce meets the required difficulty for a context.
///
/// Zero difficulty always passes.
pub fn validate_work(context: &WorkContext, nonce: WorkNonce, difficulty_bits: u32) -> bool {
    if difficulty_bits == 0 {
        return true;
    }
    let digest = blake2b_256(&context.preimage(nonce.0));
    leading_zero_bits(&digest) >= difficulty_bits
}
