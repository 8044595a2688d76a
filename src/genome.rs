//! # Genome
//!
//! A `Genome` pairs a [`Bitset`] with a fitness score and an optional origin
//! (raw, pre-transform) score. The engine shares genomes between the main
//! loop and the evaluation workers as `Arc<Genome>`; the scores live in
//! atomics so a worker can record them through a shared reference while the
//! bits stay immutable.
//!
//! ## Example
//!
//! ```rust
//! use genbits::bitset::Bitset;
//! use genbits::genome::Genome;
//!
//! let genome = Genome::new(Bitset::from_bytes(vec![1, 0, 1]));
//! assert_eq!(genome.fitness(), 0.0);
//!
//! genome.set_origin(-2.5);
//! genome.set_fitness(1.0 / (1.0 + 2.5));
//! assert_eq!(genome.origin(), -2.5);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bitset::Bitset;
use crate::rng::RandomNumberGenerator;

/// One candidate solution: a bit sequence plus its scores.
pub struct Genome {
    bits: Bitset,
    fitness: AtomicU64,
    origin: AtomicU64,
}

impl Genome {
    /// Creates a genome owning `bits`, with both scores zeroed.
    pub fn new(bits: Bitset) -> Self {
        Self {
            bits,
            fitness: AtomicU64::new(0f64.to_bits()),
            origin: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Creates a genome with a fresh copy of `bits`. Scores start at zero.
    pub fn from_bits_of(other: &Genome) -> Self {
        Self::new(other.bits.copy())
    }

    pub fn bits(&self) -> &Bitset {
        &self.bits
    }

    pub fn bits_mut(&mut self) -> &mut Bitset {
        &mut self.bits
    }

    pub fn into_bits(self) -> Bitset {
        self.bits
    }

    /// Fitness recorded by the last evaluation. Only meaningful once evaluated.
    pub fn fitness(&self) -> f64 {
        f64::from_bits(self.fitness.load(Ordering::Acquire))
    }

    pub fn set_fitness(&self, fitness: f64) {
        self.fitness.store(fitness.to_bits(), Ordering::Release);
    }

    /// Raw score before any fitness transform. Used as the elite tie-break.
    pub fn origin(&self) -> f64 {
        f64::from_bits(self.origin.load(Ordering::Acquire))
    }

    pub fn set_origin(&self, origin: f64) {
        self.origin.store(origin.to_bits(), Ordering::Release);
    }
}

impl Clone for Genome {
    fn clone(&self) -> Self {
        let genome = Genome::new(self.bits.copy());
        genome.set_fitness(self.fitness());
        genome.set_origin(self.origin());
        genome
    }
}

impl Default for Genome {
    fn default() -> Self {
        Self::new(Bitset::default())
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome")
            .field("bits", &self.bits)
            .field("fitness", &self.fitness())
            .field("origin", &self.origin())
            .finish()
    }
}

/// Produces one freshly encoded genome per call.
///
/// Invoked once per population slot at initialisation and once per
/// reinjected random slot every generation. Any `FnMut() -> Genome`
/// closure is a factory.
pub trait GenomeFactory: Send {
    fn create(&mut self) -> Genome;
}

impl<F> GenomeFactory for F
where
    F: FnMut() -> Genome + Send,
{
    fn create(&mut self) -> Genome {
        self()
    }
}

/// Factory that produces genomes with no bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullGenomeFactory;

impl GenomeFactory for NullGenomeFactory {
    fn create(&mut self) -> Genome {
        Genome::default()
    }
}

/// Factory that produces genomes of `len` uniformly random 0/1 cells.
#[derive(Debug, Clone)]
pub struct RandomBitsetFactory {
    len: usize,
    rng: RandomNumberGenerator,
}

impl RandomBitsetFactory {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            rng: RandomNumberGenerator::new(),
        }
    }

    pub fn with_seed(len: usize, seed: u64) -> Self {
        Self {
            len,
            rng: RandomNumberGenerator::from_seed(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl GenomeFactory for RandomBitsetFactory {
    fn create(&mut self) -> Genome {
        let bits: Vec<u8> = (0..self.len).map(|_| self.rng.gen_bit()).collect();
        Genome::new(Bitset::from_bytes(bits))
    }
}
