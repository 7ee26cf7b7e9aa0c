//! Visit orders for the fallback partner searches
//!
//! The second and third tiers of partner selection walk the training set in a
//! fresh random order each time. The order comes from a `PermutationSource` so
//! a run can be made reproducible (seeded) or fully deterministic in tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces permutations of `0..n`
pub trait PermutationSource {
    fn permutation(&mut self, n: usize) -> Vec<usize>;
}

/// Uniformly random permutations from a `StdRng`
#[derive(Debug, Clone)]
pub struct RandomPermutation {
    rng: StdRng,
}

impl RandomPermutation {
    /// Seeded generator, or one seeded from the thread RNG when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };
        Self { rng }
    }
}

impl PermutationSource for RandomPermutation {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut self.rng);
        order
    }
}

/// Always returns `0..n` in order
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialPermutation;

impl PermutationSource for SequentialPermutation {
    fn permutation(&mut self, n: usize) -> Vec<usize> {
        (0..n).collect()
    }
}
