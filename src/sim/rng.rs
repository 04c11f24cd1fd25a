//! Injectable randomness
//!
//! Every random draw in the simulation goes through [`RandomSource`], so a
//! run is fully determined by its seed and inputs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the few random numbers the simulation needs
pub trait RandomSource {
    /// Uniform integer in `low..=high`
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32;
    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize;
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        assert!(low <= high, "empty range {low}..={high}");
        self.rng.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty set");
        self.rng.random_range(0..len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        (**self).range_inclusive(low, high)
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}
