//! # GeneticOptions
//!
//! The `GeneticOptions` struct holds the configuration of a
//! [`GeneticAlgorithm`](super::GeneticAlgorithm) run.
//!
//! ## Example
//!
//! ```rust
//! use genbits::evolution::GeneticOptions;
//!
//! let options = GeneticOptions::builder()
//!     .population_size(100)
//!     .parallel_simulations(4)
//!     .random_ratio(0.05)
//!     .build();
//! assert!(options.validate().is_ok());
//!
//! let defaults = GeneticOptions::default();
//! assert_eq!(defaults.get_population_size(), 10);
//! assert_eq!(defaults.get_mater_extra_ratio(), 2);
//! ```
//!
//! ## Fields
//!
//! - `population_size`: genomes per generation. Zero is accepted here and makes
//!   every run report `false` without evaluating anything.
//! - `parallel_simulations`: number of evaluation workers.
//! - `mater_extra_ratio`: the mating phase fills `population_size * ratio`
//!   candidates before survivors are chosen.
//! - `random_ratio`: share of every new generation replaced by fresh genomes
//!   from the factory.
//! - `lru_size`: capacity of the duplicate-suppression cache.
//! - `duplicate_retry_limit`: consecutive duplicate children tolerated before
//!   one is admitted anyway.
//! - `seed`: optional seed for the engine's random number generator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GeneticError, Result};

const DEFAULT_POPULATION_SIZE: usize = 10;
const DEFAULT_PARALLEL_SIMULATIONS: usize = 1;
const DEFAULT_MATER_EXTRA_RATIO: usize = 2;
const DEFAULT_RANDOM_RATIO: f64 = 0.1;
const DEFAULT_LRU_SIZE: usize = 100_000;
const DEFAULT_DUPLICATE_RETRY_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticOptions {
    population_size: usize,
    parallel_simulations: usize,
    mater_extra_ratio: usize,
    random_ratio: f64,
    lru_size: usize,
    duplicate_retry_limit: usize,
    seed: Option<u64>,
}

impl GeneticOptions {
    pub fn new(population_size: usize, parallel_simulations: usize) -> Self {
        Self {
            population_size,
            parallel_simulations,
            ..Self::default()
        }
    }

    /// Checks every field that cannot be surfaced through the run result.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] when the worker count, the
    /// mating ratio or the cache capacity is zero, or when the random ratio
    /// lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_simulations == 0 {
            return Err(GeneticError::Configuration(
                "Parallel simulations cannot be zero".to_string(),
            ));
        }

        if self.mater_extra_ratio == 0 {
            return Err(GeneticError::Configuration(
                "Mater extra ratio cannot be zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.random_ratio) {
            return Err(GeneticError::Configuration(format!(
                "Random ratio must lie in [0, 1], got {}",
                self.random_ratio
            )));
        }

        if self.lru_size == 0 {
            return Err(GeneticError::Configuration(
                "LRU size cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_parallel_simulations(&self) -> usize {
        self.parallel_simulations
    }

    pub fn get_mater_extra_ratio(&self) -> usize {
        self.mater_extra_ratio
    }

    pub fn get_random_ratio(&self) -> f64 {
        self.random_ratio
    }

    pub fn get_lru_size(&self) -> usize {
        self.lru_size
    }

    pub fn get_duplicate_retry_limit(&self) -> usize {
        self.duplicate_retry_limit
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Size of the candidate pool filled during the mating phase.
    pub fn mating_pool_size(&self) -> usize {
        self.population_size * self.mater_extra_ratio
    }

    /// Number of next-generation slots taken from the sorted candidate pool.
    /// The rest are filled with fresh genomes.
    pub fn survivor_count(&self) -> usize {
        let survivors = (self.population_size as f64 * (1.0 - self.random_ratio)) as usize;
        survivors.min(self.population_size)
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_parallel_simulations(&mut self, parallel_simulations: usize) {
        self.parallel_simulations = parallel_simulations;
    }

    pub fn set_mater_extra_ratio(&mut self, ratio: usize) {
        self.mater_extra_ratio = ratio;
    }

    pub fn set_random_ratio(&mut self, ratio: f64) {
        self.random_ratio = ratio;
    }

    pub fn set_lru_size(&mut self, lru_size: usize) {
        self.lru_size = lru_size;
    }

    pub fn set_duplicate_retry_limit(&mut self, limit: usize) {
        self.duplicate_retry_limit = limit;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating a `GeneticOptions` instance.
    pub fn builder() -> GeneticOptionsBuilder {
        GeneticOptionsBuilder::default()
    }
}

impl Default for GeneticOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            parallel_simulations: DEFAULT_PARALLEL_SIMULATIONS,
            mater_extra_ratio: DEFAULT_MATER_EXTRA_RATIO,
            random_ratio: DEFAULT_RANDOM_RATIO,
            lru_size: DEFAULT_LRU_SIZE,
            duplicate_retry_limit: DEFAULT_DUPLICATE_RETRY_LIMIT,
            seed: None,
        }
    }
}

/// Builder for `GeneticOptions`.
///
/// Unset fields take the documented defaults.
#[derive(Debug, Clone, Default)]
pub struct GeneticOptionsBuilder {
    population_size: Option<usize>,
    parallel_simulations: Option<usize>,
    mater_extra_ratio: Option<usize>,
    random_ratio: Option<f64>,
    lru_size: Option<usize>,
    duplicate_retry_limit: Option<usize>,
    seed: Option<u64>,
}

impl GeneticOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn parallel_simulations(mut self, value: usize) -> Self {
        self.parallel_simulations = Some(value);
        self
    }

    pub fn mater_extra_ratio(mut self, value: usize) -> Self {
        self.mater_extra_ratio = Some(value);
        self
    }

    pub fn random_ratio(mut self, value: f64) -> Self {
        self.random_ratio = Some(value);
        self
    }

    pub fn lru_size(mut self, value: usize) -> Self {
        self.lru_size = Some(value);
        self
    }

    pub fn duplicate_retry_limit(mut self, value: usize) -> Self {
        self.duplicate_retry_limit = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn build(self) -> GeneticOptions {
        GeneticOptions {
            population_size: self.population_size.unwrap_or(DEFAULT_POPULATION_SIZE),
            parallel_simulations: self
                .parallel_simulations
                .unwrap_or(DEFAULT_PARALLEL_SIMULATIONS),
            mater_extra_ratio: self.mater_extra_ratio.unwrap_or(DEFAULT_MATER_EXTRA_RATIO),
            random_ratio: self.random_ratio.unwrap_or(DEFAULT_RANDOM_RATIO),
            lru_size: self.lru_size.unwrap_or(DEFAULT_LRU_SIZE),
            duplicate_retry_limit: self
                .duplicate_retry_limit
                .unwrap_or(DEFAULT_DUPLICATE_RETRY_LIMIT),
            seed: self.seed,
        }
    }
}
