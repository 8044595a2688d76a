use std::fmt;
use std::sync::Arc;

use super::Mater;
use crate::{genome::Genome, rng::RandomNumberGenerator};

/// A boxed recombination function, as stored in a [`MaterFunctionProbability`].
pub type MateFunction =
    Box<dyn FnMut(&Genome, &Genome, &mut RandomNumberGenerator) -> (Genome, Genome) + Send>;

/// A recombination function `f` applied with probability `p`
/// (0 = never, 1 = for every pair).
///
/// With `use_elite` set, the tracked elite replaces the second argument.
pub struct MaterFunctionProbability {
    pub p: f32,
    pub f: MateFunction,
    pub use_elite: bool,
}

impl MaterFunctionProbability {
    pub fn new<F>(p: f32, f: F) -> Self
    where
        F: FnMut(&Genome, &Genome, &mut RandomNumberGenerator) -> (Genome, Genome) + Send + 'static,
    {
        Self {
            p,
            f: Box::new(f),
            use_elite: false,
        }
    }

    /// Same as [`MaterFunctionProbability::new`], but `f` receives the
    /// current elite as its second argument.
    pub fn with_elite<F>(p: f32, f: F) -> Self
    where
        F: FnMut(&Genome, &Genome, &mut RandomNumberGenerator) -> (Genome, Genome) + Send + 'static,
    {
        Self {
            p,
            f: Box::new(f),
            use_elite: true,
        }
    }
}

impl fmt::Debug for MaterFunctionProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterFunctionProbability")
            .field("p", &self.p)
            .field("use_elite", &self.use_elite)
            .finish_non_exhaustive()
    }
}

/// Mater that runs an ordered chain of probability-gated recombination
/// functions.
///
/// Each call starts from fresh copies of both parents. Every entry is then
/// considered exactly once, in order, with its own draw; when it fires, its
/// two outputs replace the running pair. Entries therefore compose: a
/// crossover followed by a mutation mutates the crossover's output.
///
/// # Examples
///
/// ```
/// use genbits::breeding::{mutate, one_point_crossover, MaterFunctionProbability, ProbabilityMater};
///
/// let mater = ProbabilityMater::new(vec![
///     MaterFunctionProbability::new(0.5, one_point_crossover),
///     MaterFunctionProbability::new(0.05, mutate),
///     MaterFunctionProbability::with_elite(0.1, one_point_crossover),
/// ]);
/// assert!(mater.elite().is_none());
/// ```
#[derive(Debug)]
pub struct ProbabilityMater {
    entries: Vec<MaterFunctionProbability>,
    elite: Option<Arc<Genome>>,
}

impl ProbabilityMater {
    pub fn new(entries: Vec<MaterFunctionProbability>) -> Self {
        Self {
            entries,
            elite: None,
        }
    }

    /// The elite recorded by the last [`Mater::on_elite`] call.
    pub fn elite(&self) -> Option<&Arc<Genome>> {
        self.elite.as_ref()
    }
}

impl Mater for ProbabilityMater {
    fn mate(
        &mut self,
        parent_a: &Genome,
        parent_b: &Genome,
        rng: &mut RandomNumberGenerator,
    ) -> (Genome, Genome) {
        let mut child_a = Genome::from_bits_of(parent_a);
        let mut child_b = Genome::from_bits_of(parent_b);

        for entry in self.entries.iter_mut() {
            if rng.gen_probability() >= entry.p {
                continue;
            }

            // Before the first elite is known, elite-biased entries use the running pair.
            let (next_a, next_b) = match (entry.use_elite, self.elite.as_deref()) {
                (true, Some(elite)) => (entry.f)(&child_a, elite, rng),
                _ => (entry.f)(&child_a, &child_b, rng),
            };
            child_a = next_a;
            child_b = next_b;
        }

        (child_a, child_b)
    }

    fn on_elite(&mut self, elite: &Arc<Genome>) {
        self.elite = Some(Arc::clone(elite));
    }
}
