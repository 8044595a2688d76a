//! # GeneticAlgorithm
//!
//! The generational loop. One run alternates between an evaluation phase,
//! in which the worker pool scores genomes, and a mating phase, in which the
//! main thread breeds the next candidate pool while already queued children
//! are being scored.
//!
//! Each generation:
//!
//! 1. the elite of the scored population is picked (highest fitness, then
//!    highest origin) and handed to the mater and the elite consumer;
//! 2. the exit predicate is consulted with the elite;
//! 3. a candidate pool of `population_size * mater_extra_ratio` genomes is
//!    filled: a fresh copy of the elite first, then simulator overrides, then
//!    children of parents drawn from the previous population. Bit patterns
//!    already in the pool are rejected;
//! 4. the pool is sorted by fitness, the best candidates survive and the
//!    remaining slots are refilled from the genome factory.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use genbits::breeding::{mutate, one_point_crossover, MaterFunctionProbability, ProbabilityMater};
//! use genbits::evolution::{GeneticAlgorithm, GeneticOptions, Simulator};
//! use genbits::genome::{Genome, RandomBitsetFactory};
//!
//! struct OneMax;
//!
//! impl Simulator for OneMax {
//!     fn evaluate(&self, genome: &Genome) {
//!         genome.set_fitness(genome.bits().iter().filter(|&c| c == 1).count() as f64);
//!     }
//!
//!     fn on_end_generation(&mut self, _population: &[Arc<Genome>]) {}
//! }
//!
//! let mut ga = GeneticAlgorithm::builder()
//!     .with_options(GeneticOptions::builder().population_size(20).seed(3).build())
//!     .with_simulator(OneMax)
//!     .with_mater(ProbabilityMater::new(vec![
//!         MaterFunctionProbability::new(0.8, one_point_crossover),
//!         MaterFunctionProbability::new(0.3, mutate),
//!     ]))
//!     .with_genome_factory(RandomBitsetFactory::with_seed(16, 3))
//!     .build()
//!     .unwrap();
//!
//! let finished = ga.simulate_until(|elite| elite.fitness() >= 12.0).unwrap();
//! assert!(finished);
//! assert!(ga.elite().unwrap().fitness() >= 12.0);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use super::{
    builder::GeneticAlgorithmBuilder,
    dedup::DuplicateFilter,
    options::GeneticOptions,
    pool::{EvaluationPool, EvaluationSession},
    simulator::{EliteConsumer, Simulator},
};
use crate::{
    breeding::Mater,
    error::{GeneticError, OptionExt, Result},
    genome::{Genome, GenomeFactory},
    rng::RandomNumberGenerator,
    selection::Selector,
};

pub struct GeneticAlgorithm {
    options: GeneticOptions,
    simulator: Box<dyn Simulator>,
    mater: Box<dyn Mater>,
    selector: Box<dyn Selector>,
    elite_consumer: Box<dyn EliteConsumer>,
    genome_factory: Box<dyn GenomeFactory>,
    pool: EvaluationPool,
    filter: DuplicateFilter,
    population: Vec<Arc<Genome>>,
    rng: RandomNumberGenerator,
    generation: usize,
}

impl GeneticAlgorithm {
    pub fn builder() -> GeneticAlgorithmBuilder {
        GeneticAlgorithmBuilder::new()
    }

    pub(super) fn assemble(
        options: GeneticOptions,
        simulator: Box<dyn Simulator>,
        mater: Box<dyn Mater>,
        selector: Box<dyn Selector>,
        elite_consumer: Box<dyn EliteConsumer>,
        genome_factory: Box<dyn GenomeFactory>,
    ) -> Result<Self> {
        options.validate()?;

        let mut ga = Self {
            pool: EvaluationPool::new(options.get_parallel_simulations())?,
            filter: DuplicateFilter::new(options.get_lru_size())?,
            rng: RandomNumberGenerator::from_optional_seed(options.get_seed()),
            options,
            simulator,
            mater,
            selector,
            elite_consumer,
            genome_factory,
            population: Vec::new(),
            generation: 0,
        };
        ga.populate();

        Ok(ga)
    }

    /// Replaces the options, restarts the worker pool and rebuilds the
    /// population from the genome factory.
    ///
    /// # Errors
    ///
    /// Fails with [`GeneticError::Configuration`] if `options` is invalid.
    /// The engine is left untouched in that case.
    pub fn init(&mut self, options: GeneticOptions) -> Result<()> {
        options.validate()?;

        self.pool = EvaluationPool::new(options.get_parallel_simulations())?;
        self.filter = DuplicateFilter::new(options.get_lru_size())?;
        self.rng = RandomNumberGenerator::from_optional_seed(options.get_seed());
        self.options = options;
        self.generation = 0;
        self.populate();

        Ok(())
    }

    /// Runs until the simulator's [`Simulator::should_terminate`] accepts an
    /// elite.
    ///
    /// Returns `Ok(false)` without doing anything when the population size
    /// is zero, `Ok(true)` once the run terminated normally.
    ///
    /// # Errors
    ///
    /// Propagates selection failures such as an empty population or a
    /// total fitness the selector cannot sample from.
    pub fn simulate(&mut self) -> Result<bool> {
        self.run(None)
    }

    /// Same as [`GeneticAlgorithm::simulate`], but `predicate` replaces the
    /// simulator's exit check for this run.
    pub fn simulate_until<F>(&mut self, mut predicate: F) -> Result<bool>
    where
        F: FnMut(&Genome) -> bool,
    {
        self.run(Some(&mut predicate))
    }

    pub fn options(&self) -> &GeneticOptions {
        &self.options
    }

    /// The current population. Fully scored once a run has returned.
    pub fn population(&self) -> &[Arc<Genome>] {
        &self.population
    }

    /// Number of bred generations in the last run. The initial population
    /// is generation 0.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best genome of the current population.
    pub fn elite(&self) -> Option<&Arc<Genome>> {
        select_elite(&self.population)
    }

    fn populate(&mut self) {
        let factory = &mut self.genome_factory;
        self.population = (0..self.options.get_population_size())
            .map(|_| Arc::new(factory.create()))
            .collect();
    }

    fn run(&mut self, mut until: Option<&mut dyn FnMut(&Genome) -> bool>) -> Result<bool> {
        let population_size = self.options.get_population_size();
        if population_size == 0 {
            warn!("Population size is zero, nothing to simulate");
            return Ok(false);
        }

        info!(
            population_size,
            workers = self.pool.workers(),
            "Starting simulation"
        );
        self.generation = 0;
        self.evaluate_initial_population();

        loop {
            let elite = select_elite(&self.population)
                .cloned()
                .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

            self.mater.on_elite(&elite);
            self.elite_consumer.on_elite(&elite);
            debug!(
                generation = self.generation,
                fitness = elite.fitness(),
                origin = elite.origin(),
                "Elite selected"
            );

            let done = match until.as_deref_mut() {
                Some(predicate) => predicate(&*elite),
                None => self.simulator.should_terminate(&elite),
            };
            if done {
                info!(
                    generations = self.generation,
                    fitness = elite.fitness(),
                    "Simulation finished"
                );
                return Ok(true);
            }

            self.breed_generation(&elite)?;
            self.generation += 1;
        }
    }

    fn evaluate_initial_population(&mut self) {
        let overrides = self.simulator.on_begin_generation();
        if overrides.len() > self.population.len() {
            debug!(
                supplied = overrides.len(),
                used = self.population.len(),
                "Extra initial genomes dropped"
            );
        }
        for (slot, genome) in self.population.iter_mut().zip(overrides) {
            *slot = Arc::new(genome);
        }

        self.pool.evaluate_all(&*self.simulator, &self.population);
        self.simulator.on_end_generation(&self.population);
    }

    fn breed_generation(&mut self, elite: &Arc<Genome>) -> Result<()> {
        let population_size = self.options.get_population_size();
        let capacity = self.options.mating_pool_size();
        let survivors = self.options.survivor_count();
        let retry_limit = self.options.get_duplicate_retry_limit();

        let overrides = self.simulator.on_begin_generation();
        let total_fitness: f64 = self.population.iter().map(|g| g.fitness()).sum();

        let Self {
            simulator,
            mater,
            selector,
            genome_factory,
            pool,
            filter,
            population,
            rng,
            ..
        } = self;

        filter.clear();
        filter.record(elite.bits());

        let mating = pool.session(&**simulator, |session| {
            let mut next = CandidatePool::new(capacity, filter, retry_limit);
            next.push(Arc::new(Genome::from_bits_of(elite)), session);

            for genome in overrides {
                next.offer(genome, session);
            }

            while !next.is_full() {
                let parent_a = selector.select(population.as_slice(), total_fitness, rng)?;
                let parent_b = selector.select(population.as_slice(), total_fitness, rng)?;
                let (child_a, child_b) = mater.mate(&parent_a, &parent_b, rng);
                next.offer(child_a, session);
                next.offer(child_b, session);
            }

            Ok::<_, GeneticError>(next)
        })?;

        let rejected = mating.rejected;
        let mut candidates = mating.candidates;
        candidates.sort_by(|a, b| by_descending_fitness(a.fitness(), b.fitness()));
        candidates.truncate(survivors);

        let fresh: Vec<Arc<Genome>> = (candidates.len()..population_size)
            .map(|_| Arc::new(genome_factory.create()))
            .collect();
        pool.evaluate_all(&**simulator, &fresh);
        candidates.extend(fresh);

        *population = candidates;
        simulator.on_end_generation(population);

        debug!(
            generation = self.generation + 1,
            total_fitness,
            rejected,
            best = ?self.population.first().map(|g| g.fitness()),
            "Generation bred"
        );

        Ok(())
    }
}

impl fmt::Debug for GeneticAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("options", &self.options)
            .field("pool", &self.pool)
            .field("population", &self.population.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// The candidate pool of the generation being bred.
struct CandidatePool<'f> {
    candidates: Vec<Arc<Genome>>,
    capacity: usize,
    filter: &'f mut DuplicateFilter,
    retry_limit: usize,
    consecutive_rejections: usize,
    rejected: usize,
}

impl<'f> CandidatePool<'f> {
    fn new(capacity: usize, filter: &'f mut DuplicateFilter, retry_limit: usize) -> Self {
        Self {
            candidates: Vec::with_capacity(capacity),
            capacity,
            filter,
            retry_limit,
            consecutive_rejections: 0,
            rejected: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.candidates.len() >= self.capacity
    }

    fn push(&mut self, genome: Arc<Genome>, session: &EvaluationSession<'_, '_>) {
        session.dispatch(Arc::clone(&genome));
        self.candidates.push(genome);
    }

    /// Adds `genome` unless the pool is full or its bits are already in the
    /// pool. Duplicates are let through once `retry_limit` of them were
    /// rejected in a row.
    fn offer(&mut self, genome: Genome, session: &EvaluationSession<'_, '_>) {
        if self.is_full() {
            return;
        }

        if !self.filter.admit(genome.bits()) {
            if self.consecutive_rejections < self.retry_limit {
                self.consecutive_rejections += 1;
                self.rejected += 1;
                trace!(rejected = self.rejected, "Duplicate genome rejected");
                return;
            }
            warn!(
                retries = self.consecutive_rejections,
                "Duplicate retry limit reached, admitting duplicate genome"
            );
        }

        self.consecutive_rejections = 0;
        self.push(Arc::new(genome), session);
    }
}

/// Highest fitness wins, then highest origin. NaN fitness never wins; on a
/// full tie the earlier genome is kept.
fn select_elite(population: &[Arc<Genome>]) -> Option<&Arc<Genome>> {
    let (first, rest) = population.split_first()?;
    Some(rest.iter().fold(first, |elite, genome| {
        if outranks(genome, elite) {
            genome
        } else {
            elite
        }
    }))
}

fn outranks(challenger: &Genome, elite: &Genome) -> bool {
    let (challenger_fitness, elite_fitness) = (challenger.fitness(), elite.fitness());
    if challenger_fitness.is_nan() {
        return false;
    }
    if elite_fitness.is_nan() {
        return true;
    }
    challenger_fitness > elite_fitness
        || (challenger_fitness == elite_fitness && challenger.origin() > elite.origin())
}

/// Descending order with NaN sorted last.
fn by_descending_fitness(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or_else(|| {
        if b.is_nan() && a.is_nan() {
            Ordering::Equal
        } else if b.is_nan() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    })
}
