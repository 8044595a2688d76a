//! # Mater
//!
//! The `Mater` trait defines how two selected parents are combined into two
//! children. [`ProbabilityMater`] chains the recombination functions from
//! [`operators`], each gated by its own probability; [`NullMater`] copies the
//! parents through unchanged.
pub mod operators;
pub mod probability;

use std::sync::Arc;

use crate::{genome::Genome, rng::RandomNumberGenerator};

pub use operators::{mutate, one_point_crossover, two_point_crossover, uniform_crossover};
pub use probability::{MateFunction, MaterFunctionProbability, ProbabilityMater};

/// Combines two parent genomes into two child genomes.
pub trait Mater: Send {
    /// Produces two children from `parent_a` and `parent_b`.
    ///
    /// The returned genomes are new values; the parents must not be modified.
    fn mate(
        &mut self,
        parent_a: &Genome,
        parent_b: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> (Genome, Genome);

    /// Records the elite of the generation just evaluated. Called once per
    /// generation before any mating happens.
    fn on_elite(&mut self, elite: &Arc<Genome>);
}

/// Mater that returns fresh genomes holding copies of the parents' bits and
/// ignores elite notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMater;

impl Mater for NullMater {
    fn mate(
        &mut self,
        parent_a: &Genome,
        parent_b: &Genome,
        _rng: &mut RandomNumberGenerator,
    ) -> (Genome, Genome) {
        (Genome::from_bits_of(parent_a), Genome::from_bits_of(parent_b))
    }

    fn on_elite(&mut self, _elite: &Arc<Genome>) {}
}
