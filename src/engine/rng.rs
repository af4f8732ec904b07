//! Seeded linear congruential generator
//!
//! Bingo cards are shared as a bare seed, so this sequence must match
//! bit-for-bit everywhere it is reproduced. Pure 32-bit integer arithmetic;
//! the only float operation is the final division.

use rand::RngCore;
use serde::{Deserialize, Serialize};

pub const LCG_MULTIPLIER: u32 = 1_664_525;
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Output divisor (2^32 - 1)
const OUTPUT_DIVISOR: f64 = u32::MAX as f64;

/// 32-bit LCG: `state = state * 1664525 + 1013904223 (mod 2^32)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg32 {
    state: u32,
}

impl Lcg32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current raw state
    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Next float, `state / (2^32 - 1)`.
    ///
    /// Lands in [0, 1) for every state except `u32::MAX`, which yields
    /// exactly 1.0. The formula is kept as-is so shared seeds reproduce.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / OUTPUT_DIVISOR
    }

    /// Next index in `[0, len)`: `floor(next_f64() * len)`, clamped for the
    /// 1.0 edge case. `len` must be non-zero.
    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index on an empty range");
        let idx = (self.next_f64() * len as f64).floor() as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl Iterator for Lcg32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

impl RngCore for Lcg32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sequence_seed_42() {
        let mut rng = Lcg32::new(42);
        let expected = [1_083_814_273u32, 378_494_188, 2_479_403_867];
        for want in expected {
            let got = rng.next_f64();
            assert_eq!(rng.state(), want);
            assert_eq!(got, want as f64 / 4_294_967_295.0);
        }
    }

    #[test]
    fn test_seed_zero_first_value() {
        let mut rng = Lcg32::new(0);
        let v = rng.next_f64();
        assert_eq!(rng.state(), LCG_INCREMENT);
        assert!((v - 0.236_067_972_899_430_43).abs() < 1e-15);
    }

    #[test]
    fn test_max_state_yields_one_and_index_clamps() {
        // 653637408 steps to u32::MAX
        let mut rng = Lcg32::new(653_637_408);
        assert_eq!(rng.clone().next_f64(), 1.0);
        assert_eq!(rng.next_index(10), 9);
        assert_eq!(rng.state(), u32::MAX);
    }

    #[test]
    fn test_iterator_matches_next_f64() {
        let a: Vec<f64> = Lcg32::new(1234).take(5).collect();
        let mut rng = Lcg32::new(1234);
        let b: Vec<f64> = (0..5).map(|_| rng.next_f64()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rng_core_next_u32_is_raw_state() {
        let mut rng = Lcg32::new(42);
        assert_eq!(rng.next_u32(), 1_083_814_273);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn same_seed_same_sequence(seed: u32) {
                let a: Vec<f64> = Lcg32::new(seed).take(64).collect();
                let b: Vec<f64> = Lcg32::new(seed).take(64).collect();
                prop_assert_eq!(a, b);
            }

            #[test]
            fn outputs_within_unit_interval(seed: u32) {
                for v in Lcg32::new(seed).take(200) {
                    prop_assert!((0.0..=1.0).contains(&v));
                }
            }

            #[test]
            fn index_always_in_range(seed: u32, len in 1usize..500) {
                let mut rng = Lcg32::new(seed);
                for _ in 0..50 {
                    prop_assert!(rng.next_index(len) < len);
                }
            }
        }
    }
}
