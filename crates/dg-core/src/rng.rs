//! Random number generation for layout generators
//!
//! Uses a seeded ChaCha RNG for reproducibility. Generators only ever see the
//! [`RandomSource`] trait, so tests can substitute scripted sources.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Uniform integer source consumed by every generator.
pub trait RandomSource {
    /// Returns a value in `min..max` (max exclusive).
    ///
    /// Returns `min` if the range is empty.
    fn range(&mut self, min: i32, max: i32) -> i32;

    /// Fair coin; true half of the time
    fn coin_flip(&mut self) -> bool {
        self.range(0, 2) == 0
    }

    /// Returns true with probability 1/n
    ///
    /// `n` above `i32::MAX` is clamped to it.
    fn one_in(&mut self, n: u32) -> bool {
        let n = i32::try_from(n).unwrap_or(i32::MAX);
        n <= 1 || self.range(0, n) == 0
    }

    /// Choose a random element from a slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.range(0, items.len() as i32) as usize])
        }
    }
}

/// Seeded generator random source
///
/// Wraps ChaCha8Rng so that a seed fully determines a generated layout.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
