//! # Simulator
//!
//! The `Simulator` trait is the user-supplied evaluator. The engine calls its
//! hooks from the main loop and its [`Simulator::evaluate`] method from the
//! evaluation workers, so implementations must be `Sync`; state touched by
//! `evaluate` needs interior mutability (atomics, `Mutex`).
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use genbits::evolution::Simulator;
//! use genbits::genome::Genome;
//!
//! /// Counts the 1-cells of a genome.
//! struct OneMax {
//!     target: f64,
//! }
//!
//! impl Simulator for OneMax {
//!     fn evaluate(&self, genome: &Genome) {
//!         let ones = genome.bits().iter().filter(|&c| c == 1).count();
//!         genome.set_fitness(ones as f64);
//!     }
//!
//!     fn on_end_generation(&mut self, _population: &[Arc<Genome>]) {}
//!
//!     fn should_terminate(&mut self, elite: &Genome) -> bool {
//!         elite.fitness() >= self.target
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::genome::Genome;

/// Scores genomes and observes the generational loop.
pub trait Simulator: Send + Sync {
    /// Called at the start of every generation, before any scoring.
    ///
    /// Genomes returned here are scored in this generation alongside the
    /// engine's own candidates.
    fn on_begin_generation(&mut self) -> Vec<Genome> {
        Vec::new()
    }

    /// Scores one genome by writing its fitness (and optionally origin).
    ///
    /// Runs on a worker thread. Each genome is evaluated by exactly one
    /// worker at a time.
    fn evaluate(&self, genome: &Genome);

    /// Called once every genome of the new population has been scored.
    fn on_end_generation(&mut self, population: &[Arc<Genome>]);

    /// Exit predicate, consulted with the elite once per generation unless
    /// the run was started with an explicit predicate.
    fn should_terminate(&mut self, _elite: &Genome) -> bool {
        false
    }
}

/// Simulator that leaves every score at zero and never terminates a run on
/// its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSimulator;

impl Simulator for NullSimulator {
    fn evaluate(&self, _genome: &Genome) {}

    fn on_end_generation(&mut self, _population: &[Arc<Genome>]) {}
}

/// Receives the elite of every generation, for reporting only.
///
/// Any `FnMut(&Genome)` closure is an elite consumer.
pub trait EliteConsumer: Send {
    fn on_elite(&mut self, elite: &Genome);
}

impl<F> EliteConsumer for F
where
    F: FnMut(&Genome) + Send,
{
    fn on_elite(&mut self, elite: &Genome) {
        self(elite)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullEliteConsumer;

impl EliteConsumer for NullEliteConsumer {
    fn on_elite(&mut self, _elite: &Genome) {}
}
