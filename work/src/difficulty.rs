//! The difficulty predicate: leading zero bits of the digest.
//!
//! One policy, everywhere. Each extra bit doubles the expected search; the
//! default of 14 bits (~16k hashes) lands in the 100–500 ms range on
//! commodity hardware.

/// Count the leading zero bits of a digest.
pub fn leading_zero_bits(digest: &[u8; 32]) -> u32 {
    let mut bits = 0;
    for &byte in digest {
        if byte == 0 {
            bits += 8;
            continue;
        }
        bits += byte.leading_zeros();
        break;
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_digest() {
        assert_eq!(leading_zero_bits(&[0u8; 32]), 256);
    }

    #[test]
    fn no_leading_zeros() {
        let mut d = [0u8; 32];
        d[0] = 0x80;
        assert_eq!(leading_zero_bits(&d), 0);
    }

    #[test]
    fn partial_byte() {
        let mut d = [0u8; 32];
        d[0] = 0x00;
        d[1] = 0x0F; // 8 + 4 leading zero bits
        assert_eq!(leading_zero_bits(&d), 12);
    }
}
