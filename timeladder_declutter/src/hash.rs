// Copyright 2025 the Timeladder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::{Hash, Hasher};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
#[derive(Clone, Copy, Debug)]
struct Fnv1a(u64);

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 ^= u64::from(*b);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Hashes `key` with a fixed, unseeded FNV-1a hasher.
///
/// The same key always produces the same value within a build, which is all
/// cosmetic jitter and bucket assignment need.
#[must_use]
pub fn stable_hash<K: Hash + ?Sized>(key: &K) -> u64 {
    let mut h = Fnv1a(FNV_OFFSET);
    key.hash(&mut h);
    h.finish()
}

/// Jitter in `[-max, max]` pixels derived from `hash`.
pub(crate) fn jitter_from_hash(hash: u64, max: i32) -> f64 {
    let max = max.max(0);
    let span = u64::from(max.unsigned_abs()) * 2 + 1;
    // `hash % span` is at most `2 * max`, which fits in i64.
    let offset = i64::try_from(hash % span).unwrap_or(0) - i64::from(max);
    offset as f64
}

/// Bucket tier in `0..count` derived from `hash`. Uses the upper bits so it is
/// independent of the jitter.
pub(crate) fn bucket_from_hash(hash: u64, count: u32) -> u32 {
    let count = u64::from(count.max(1));
    u32::try_from((hash >> 32) % count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{bucket_from_hash, jitter_from_hash, stable_hash};

    #[test]
    fn hash_is_stable() {
        assert_eq!(stable_hash(&42_u64), stable_hash(&42_u64));
        assert_ne!(stable_hash(&42_u64), stable_hash(&43_u64));
        assert_eq!(stable_hash("evt-1"), stable_hash("evt-1"));
    }

    #[test]
    fn jitter_stays_in_range() {
        for id in 0_u64..1_000 {
            let j = jitter_from_hash(stable_hash(&id), 2);
            assert!((-2.0..=2.0).contains(&j), "{id} -> {j}");
            assert_eq!(j, j.trunc());
        }
        assert_eq!(jitter_from_hash(12_345, 0), 0.0);
    }

    #[test]
    fn buckets_cover_all_tiers() {
        let mut seen = [false; 4];
        for id in 0_u64..200 {
            seen[bucket_from_hash(stable_hash(&id), 4) as usize] = true;
        }
        assert_eq!(seen, [true; 4]);
    }
}
