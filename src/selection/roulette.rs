use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::Selector;

/// Fitness-proportionate ("roulette wheel") selection.
///
/// A value is drawn uniformly from `[0, total_fitness)` and the population is
/// walked accumulating fitness; the first genome whose running sum exceeds
/// the draw is returned. Fitness values are expected to be non-negative.
///
/// When `total_fitness` is zero (nothing has scored yet, or every genome
/// scored zero) a uniformly random member is returned instead.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use genbits::bitset::Bitset;
/// use genbits::genome::Genome;
/// use genbits::rng::RandomNumberGenerator;
/// use genbits::selection::{RouletteSelector, Selector};
///
/// let population: Vec<Arc<Genome>> = (0..4)
///     .map(|i| {
///         let genome = Genome::new(Bitset::new(1));
///         genome.set_fitness(i as f64);
///         Arc::new(genome)
///     })
///     .collect();
/// let total: f64 = population.iter().map(|g| g.fitness()).sum();
///
/// let mut rng = RandomNumberGenerator::from_seed(1);
/// let picked = RouletteSelector.select(&population, total, &mut rng).unwrap();
/// assert!(picked.fitness() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouletteSelector;

impl RouletteSelector {
    pub fn new() -> Self {
        Self
    }
}

/// Roulette draw over `population`, usable without constructing a selector.
///
/// # Errors
///
/// - [`GeneticError::EmptyPopulation`] when `population` is empty.
/// - [`GeneticError::Selection`] when `total_fitness` is negative, not
///   finite, or larger than the population's accumulated fitness.
pub fn roulette(
    population: &[Arc<Genome>],
    total_fitness: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Arc<Genome>> {
    if population.is_empty() {
        return Err(GeneticError::EmptyPopulation);
    }

    if !total_fitness.is_finite() || total_fitness < 0.0 {
        return Err(GeneticError::Selection(format!(
            "total fitness is not a finite non-negative value: {}",
            total_fitness
        )));
    }

    if total_fitness == 0.0 {
        let idx = rng.gen_index(population.len());
        return Ok(Arc::clone(&population[idx]));
    }

    let draw = rng.gen_fitness_draw(total_fitness);
    let mut cumulative = 0.0;
    for genome in population {
        cumulative += genome.fitness();
        if cumulative > draw {
            return Ok(Arc::clone(genome));
        }
    }

    Err(GeneticError::Selection(format!(
        "total fitness is too large: drew {} but population only sums to {}",
        draw, cumulative
    )))
}

impl Selector for RouletteSelector {
    fn select(
        &mut self,
        population: &[Arc<Genome>],
        total_fitness: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Genome>> {
        roulette(population, total_fitness, rng)
    }
}
