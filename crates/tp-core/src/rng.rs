//! Deterministic simulation RNG wrapper.
//!
//! The simulator only needs randomness in two places: sampling visitor
//! itineraries and picking free grid cells for new facilities.  Both run in
//! the single-threaded edit path, so one seeded `SmallRng` is enough.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Pick `amount` distinct elements of `slice` in random order.
    ///
    /// Returns fewer than `amount` elements only when the slice is shorter.
    pub fn sample_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        use rand::seq::SliceRandom;
        slice.choose_multiple(&mut self.0, amount).cloned().collect()
    }
}
