use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;

/// Trait for parent selection.
///
/// A selector samples one genome from the current, fully evaluated
/// population. `total_fitness` is the sum of the population's fitness as
/// computed by the engine at the start of the mating phase.
///
/// Any closure with the same signature is a selector:
///
/// ```
/// use std::sync::Arc;
/// use genbits::error::Result;
/// use genbits::genome::Genome;
/// use genbits::rng::RandomNumberGenerator;
/// use genbits::selection::Selector;
///
/// let mut always_first =
///     |population: &[Arc<Genome>], _total: f64, _rng: &mut RandomNumberGenerator| -> Result<Arc<Genome>> {
///         Ok(Arc::clone(&population[0]))
///     };
///
/// let population = vec![Arc::new(Genome::default())];
/// let mut rng = RandomNumberGenerator::new();
/// let picked = always_first.select(&population, 0.0, &mut rng).unwrap();
/// assert!(Arc::ptr_eq(&picked, &population[0]));
/// ```
pub trait Selector: Send {
    /// Picks one member of `population`.
    ///
    /// # Errors
    ///
    /// Returns an error if the population is empty or if the selector cannot
    /// produce a member (for example when `total_fitness` exceeds the real sum).
    fn select(
        &mut self,
        population: &[Arc<Genome>],
        total_fitness: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Genome>>;
}

impl<F> Selector for F
where
    F: FnMut(&[Arc<Genome>], f64, &mut RandomNumberGenerator) -> Result<Arc<Genome>> + Send,
{
    fn select(
        &mut self,
        population: &[Arc<Genome>],
        total_fitness: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Genome>> {
        self(population, total_fitness, rng)
    }
}

/// Trivial selector: always returns the first member.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSelector;

impl Selector for NullSelector {
    fn select(
        &mut self,
        population: &[Arc<Genome>],
        _total_fitness: f64,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Genome>> {
        population
            .first()
            .cloned()
            .ok_or(GeneticError::EmptyPopulation)
    }
}
