//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness for
//! the engine: selection draws, operator-chain draws and crossover cut points
//! all come from one instance, so a seeded run is reproducible.
//!
//! ## Example
//!
//! ```rust
//! use genbits::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let cut = rng.gen_index_in(1, 8);
//! assert!((1..8).contains(&cut));
//!
//! let p = rng.gen_probability();
//! assert!((0.0..1.0).contains(&p));
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` with the handful of draws
/// the genetic operators need.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds a generator from an optional seed, falling back to entropy.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::new(),
        }
    }

    /// Returns a uniform value in `[0, 1)`, used for probability gates.
    pub fn gen_probability(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Returns a uniform index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Returns a uniform index in `[lower, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    pub fn gen_index_in(&mut self, lower: usize, upper: usize) -> usize {
        self.rng.gen_range(lower..upper)
    }

    /// Returns a uniform value in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is not a positive finite number.
    pub fn gen_fitness_draw(&mut self, upper: f64) -> f64 {
        self.rng.gen_range(0.0..upper)
    }

    /// Flips a fair coin.
    pub fn gen_coin(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Returns a uniformly random bit, stored as a byte cell.
    pub fn gen_bit(&mut self) -> u8 {
        u8::from(self.gen_coin())
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
