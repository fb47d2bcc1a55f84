//! Residency gate.
//!
//! An honor-system postal-code check in front of the poll. It is a trait so
//! deployments can swap the rule (different region, different id scheme)
//! without touching the vote path.

use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Decides whether a claimed residency input admits the voter.
pub trait ResidencyCheck: Send + Sync {
    fn admits(&self, input: &str) -> bool;
}

/// Admits five-digit postal codes that fall in any configured numeric range
/// or appear on an explicit allowlist.
pub struct ZipRangeCheck {
    ranges: Vec<RangeInclusive<u32>>,
    allowlist: HashSet<String>,
}

impl ZipRangeCheck {
    pub fn new(
        ranges: Vec<RangeInclusive<u32>>,
        allowlist: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            ranges,
            allowlist: allowlist.into_iter().collect(),
        }
    }

    /// The ranges the original deployment shipped with: the contiguous
    /// 75000–79999 and 88500–88599 blocks plus two enclave codes carved out
    /// of a neighboring block.
    pub fn straw_poll_defaults() -> Self {
        Self::new(
            vec![75000..=79999, 88500..=88599],
            ["73301".to_string(), "73344".to_string()],
        )
    }
}

impl ResidencyCheck for ZipRangeCheck {
    fn admits(&self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.len() != 5 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if self.allowlist.contains(trimmed) {
            return true;
        }
        let code: u32 = match trimmed.parse() {
            Ok(n) => n,
            Err(_) => return false,
        };
        self.ranges.iter().any(|r| r.contains(&code))
    }
}
