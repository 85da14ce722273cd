//! Seeded random workload generation.
//!
//! Draws burst times uniformly from an inclusive range. The same seed
//! always yields the same burst times.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Ticks;

/// Random burst-time generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadGenerator {
    min_burst: Ticks,
    max_burst: Ticks,
    seed: u64,
}

impl WorkloadGenerator {
    /// Creates a generator over `[1, 10]` with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            min_burst: 1,
            max_burst: 10,
            seed,
        }
    }

    /// Sets the inclusive burst range.
    ///
    /// Bounds are clamped to at least 1 and reordered if reversed.
    pub fn with_burst_range(mut self, min_burst: Ticks, max_burst: Ticks) -> Self {
        let lo = min_burst.max(1);
        let hi = max_burst.max(1);
        self.min_burst = lo.min(hi);
        self.max_burst = lo.max(hi);
        self
    }

    /// Inclusive burst range.
    pub fn burst_range(&self) -> (Ticks, Ticks) {
        (self.min_burst, self.max_burst)
    }

    /// Generates `count` burst times.
    pub fn burst_times(&self, count: usize) -> Vec<Ticks> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        Self::draw(&mut rng, count, self.min_burst, self.max_burst)
    }

    /// Generates `count` burst times from a caller-supplied RNG.
    pub fn draw<R: Rng>(rng: &mut R, count: usize, min_burst: Ticks, max_burst: Ticks) -> Vec<Ticks> {
        (0..count)
            .map(|_| rng.random_range(min_burst..=max_burst))
            .collect()
    }
}
