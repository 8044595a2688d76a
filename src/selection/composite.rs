use std::fmt;
use std::sync::Arc;

use crate::error::{GeneticError, Result};
use crate::genome::Genome;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::Selector;

/// One entry of a [`ProbabilitySelector`]: selector `selector` is used with
/// probability `p` (0 = never, 1 = always) when its turn comes.
pub struct SelectorFunctionProbability {
    pub p: f32,
    pub selector: Box<dyn Selector>,
}

impl SelectorFunctionProbability {
    pub fn new<S>(p: f32, selector: S) -> Self
    where
        S: Selector + 'static,
    {
        Self {
            p,
            selector: Box::new(selector),
        }
    }
}

impl fmt::Debug for SelectorFunctionProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorFunctionProbability")
            .field("p", &self.p)
            .finish_non_exhaustive()
    }
}

/// Composite selector over several weighted strategies.
///
/// Entries are tried in order, each with an independent draw against its
/// probability; the first entry that fires performs the selection. The last
/// entry always fires when reached, so a selection is always made.
///
/// # Examples
///
/// ```
/// use genbits::selection::{NullSelector, ProbabilitySelector, RouletteSelector, SelectorFunctionProbability};
///
/// let selector = ProbabilitySelector::new(vec![
///     SelectorFunctionProbability::new(0.2, NullSelector),
///     SelectorFunctionProbability::new(1.0, RouletteSelector),
/// ])
/// .unwrap();
/// assert_eq!(selector.len(), 2);
/// ```
#[derive(Debug)]
pub struct ProbabilitySelector {
    entries: Vec<SelectorFunctionProbability>,
}

impl ProbabilitySelector {
    /// # Errors
    ///
    /// Returns a configuration error when `entries` is empty.
    pub fn new(entries: Vec<SelectorFunctionProbability>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GeneticError::Configuration(
                "Probability selector needs at least one strategy".to_string(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Selector for ProbabilitySelector {
    fn select(
        &mut self,
        population: &[Arc<Genome>],
        total_fitness: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Arc<Genome>> {
        let (last, rest) = self.entries.split_last_mut().ok_or_else(|| {
            GeneticError::Configuration("Probability selector has no strategies".to_string())
        })?;

        for entry in rest {
            if rng.gen_probability() < entry.p {
                return entry.selector.select(population, total_fitness, rng);
            }
        }

        last.selector.select(population, total_fitness, rng)
    }
}
