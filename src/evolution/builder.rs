use crate::{
    breeding::{Mater, NullMater},
    error::Result,
    genome::{GenomeFactory, NullGenomeFactory},
    selection::{RouletteSelector, Selector},
};

use super::{
    options::GeneticOptions,
    simulator::{EliteConsumer, NullEliteConsumer, NullSimulator, Simulator},
    GeneticAlgorithm,
};

/// Assembles a [`GeneticAlgorithm`].
///
/// Every collaborator is optional. Missing ones fall back to the null
/// implementations, except the selector, which defaults to
/// [`RouletteSelector`].
pub struct GeneticAlgorithmBuilder {
    options: Option<GeneticOptions>,
    simulator: Option<Box<dyn Simulator>>,
    mater: Option<Box<dyn Mater>>,
    selector: Option<Box<dyn Selector>>,
    elite_consumer: Option<Box<dyn EliteConsumer>>,
    genome_factory: Option<Box<dyn GenomeFactory>>,
}

impl GeneticAlgorithmBuilder {
    pub fn new() -> Self {
        Self {
            options: None,
            simulator: None,
            mater: None,
            selector: None,
            elite_consumer: None,
            genome_factory: None,
        }
    }

    pub fn with_options(mut self, options: GeneticOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_simulator<S: Simulator + 'static>(mut self, simulator: S) -> Self {
        self.simulator = Some(Box::new(simulator));
        self
    }

    pub fn with_mater<M: Mater + 'static>(mut self, mater: M) -> Self {
        self.mater = Some(Box::new(mater));
        self
    }

    pub fn with_selector<S: Selector + 'static>(mut self, selector: S) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn with_elite_consumer<E: EliteConsumer + 'static>(mut self, consumer: E) -> Self {
        self.elite_consumer = Some(Box::new(consumer));
        self
    }

    pub fn with_genome_factory<F: GenomeFactory + 'static>(mut self, factory: F) -> Self {
        self.genome_factory = Some(Box::new(factory));
        self
    }

    /// Validates the options, starts the worker pool and creates the
    /// initial population.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`](crate::error::GeneticError::Configuration)
    /// when the options are invalid, or an error if the worker pool cannot
    /// be started.
    pub fn build(self) -> Result<GeneticAlgorithm> {
        GeneticAlgorithm::assemble(
            self.options.unwrap_or_default(),
            self.simulator.unwrap_or_else(|| Box::new(NullSimulator)),
            self.mater.unwrap_or_else(|| Box::new(NullMater)),
            self.selector.unwrap_or_else(|| Box::new(RouletteSelector)),
            self.elite_consumer
                .unwrap_or_else(|| Box::new(NullEliteConsumer)),
            self.genome_factory
                .unwrap_or_else(|| Box::new(NullGenomeFactory)),
        )
    }
}

impl Default for GeneticAlgorithmBuilder {
    fn default() -> Self {
        Self::new()
    }
}
