use proptest::prelude::*;

use poll_ballot::{shuffle, ShuffleSeed};

proptest! {
    /// Every output is a valid permutation: no duplicate, no missing ids.
    #[test]
    fn shuffle_is_a_bijection(
        seed_bytes in prop::array::uniform32(0u8..),
        len in 0usize..40,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let seed = ShuffleSeed::from_bytes(seed_bytes);
        let mut shuffled = shuffle(&items, &seed);
        shuffled.sort_unstable();
        prop_assert_eq!(shuffled, items);
    }

    /// Same seed and list produce the same permutation on every invocation.
    #[test]
    fn shuffle_is_deterministic(
        seed_bytes in prop::array::uniform32(0u8..),
        len in 1usize..40,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let seed = ShuffleSeed::from_bytes(seed_bytes);
        prop_assert_eq!(shuffle(&items, &seed), shuffle(&items, &seed));
    }

    /// Hex round trip of a seed is lossless.
    #[test]
    fn seed_hex_round_trips(seed_bytes in prop::array::uniform32(0u8..)) {
        let seed = ShuffleSeed::from_bytes(seed_bytes);
        let parsed = ShuffleSeed::from_hex(&seed.to_hex()).expect("valid hex");
        prop_assert_eq!(parsed, seed);
    }
}

/// Brute validity sweep across many derived seeds, cheap and exhaustive
/// enough to catch an off-by-one in the reverse scan.
#[test]
fn ten_thousand_seeds_all_yield_permutations() {
    let items: Vec<u16> = (0..9).collect();
    for i in 0u32..10_000 {
        let digest = poll_crypto::blake2b_256(&i.to_le_bytes());
        let seed = ShuffleSeed::from_bytes(digest);
        let mut shuffled = shuffle(&items, &seed);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items, "seed {i} broke the bijection");
    }
}
