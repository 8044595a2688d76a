//! # genbits
//!
//! A genetic algorithm engine over bit genomes. The engine owns the
//! generational loop (elitism, roulette selection, probability-gated
//! recombination, duplicate suppression, random reinjection) and scores
//! genomes on a fixed pool of worker threads. Fitness is supplied by a
//! user [`Simulator`](evolution::Simulator).
//!
//! ```rust
//! use std::sync::Arc;
//! use genbits::breeding::{mutate, two_point_crossover, MaterFunctionProbability, ProbabilityMater};
//! use genbits::evolution::{GeneticAlgorithm, GeneticOptions, Simulator};
//! use genbits::genome::{Genome, RandomBitsetFactory};
//!
//! struct CountOnes;
//!
//! impl Simulator for CountOnes {
//!     fn evaluate(&self, genome: &Genome) {
//!         genome.set_fitness(genome.bits().iter().filter(|&c| c == 1).count() as f64);
//!     }
//!     fn on_end_generation(&mut self, _population: &[Arc<Genome>]) {}
//! }
//!
//! let options = GeneticOptions::builder()
//!     .population_size(30)
//!     .parallel_simulations(2)
//!     .seed(11)
//!     .build();
//!
//! let mut ga = GeneticAlgorithm::builder()
//!     .with_options(options)
//!     .with_simulator(CountOnes)
//!     .with_mater(ProbabilityMater::new(vec![
//!         MaterFunctionProbability::new(0.7, two_point_crossover),
//!         MaterFunctionProbability::new(0.2, mutate),
//!     ]))
//!     .with_genome_factory(RandomBitsetFactory::with_seed(10, 11))
//!     .build()?;
//!
//! let mut generations = 0;
//! ga.simulate_until(|_| {
//!     generations += 1;
//!     generations > 5
//! })?;
//! assert_eq!(ga.generation(), 5);
//! # Ok::<(), genbits::GeneticError>(())
//! ```

pub mod bitset;
pub mod breeding;
pub mod error;
pub mod evolution;
pub mod genome;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use bitset::Bitset;
pub use breeding::Mater;
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{GeneticAlgorithm, GeneticOptions, Simulator};
pub use genome::Genome;
pub use selection::Selector;
