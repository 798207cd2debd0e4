//! Injectable random sources for particle seeding.
//!
//! A field never reaches for ambient randomness. It draws from a
//! [`RandomSource`] it owns, so a fixed seed replays bit-identical particle
//! sets. [`Xorshift64`] is the default source: pure integer arithmetic, same
//! sequence on every platform.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed values used to seed particles.
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the range helpers
/// are derived from it so every implementation consumes the stream the same
/// way.
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed index in [0, len).
    ///
    /// Returns 0 when `len` is 0 so callers never divide by zero.
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Uses the standard shift parameters (13, 7, 17). Seed of 0 is replaced with
/// a non-zero fallback to avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` divided by 2^53 for full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of values, wrapping around.
    struct Scripted {
        values: Vec<f64>,
        cursor: usize,
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let v = self.values[self.cursor % self.values.len()];
            self.cursor += 1;
            v
        }
    }

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every saved replay seed is invalidated.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        }
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut rng_a = Xorshift64::new(42);
        let mut rng_b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_f64().to_bits(),
                rng_b.next_f64().to_bits(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn next_index_of_empty_range_is_zero() {
        let mut rng = Xorshift64::new(7);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn next_index_never_reaches_len_even_near_one() {
        let mut rng = Scripted {
            values: vec![0.999_999_999_999],
            cursor: 0,
        };
        assert_eq!(rng.next_index(4), 3);
    }

    #[test]
    fn default_helpers_work_for_custom_sources() {
        let mut rng = Scripted {
            values: vec![0.0, 0.5],
            cursor: 0,
        };
        assert_eq!(rng.next_range(5.0, 35.0), 5.0);
        assert_eq!(rng.next_range(5.0, 35.0), 20.0);
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u64(),
                restored.next_u64(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "next_range({min}, {max}) = {v}");
                }
            }

            #[test]
            fn next_index_in_bounds_for_any_seed_and_len(
                seed: u64,
                len in 1_usize..10_000,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_index(len);
                    prop_assert!(v < len, "next_index({len}) = {v}");
                }
            }
        }
    }
}
