use std::sync::Arc;

use rayon::{Scope, ThreadPool, ThreadPoolBuilder};

use super::simulator::Simulator;
use crate::error::{Result, ResultExt};
use crate::genome::Genome;

/// A fixed-size pool of evaluation workers.
///
/// Work is submitted inside a [`EvaluationPool::session`]; the calling
/// thread keeps running while workers score genomes, and returning from the
/// session blocks until every dispatched genome has been evaluated.
pub struct EvaluationPool {
    pool: ThreadPool,
}

impl EvaluationPool {
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("genbits-eval-{}", index))
            .build()
            .context("Failed to build evaluation pool")?;

        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` with a session that dispatches genomes to `simulator`.
    /// Returns once `op` has returned and all dispatched work is done.
    pub fn session<'a, OP, R>(&self, simulator: &'a dyn Simulator, op: OP) -> R
    where
        OP: FnOnce(&EvaluationSession<'_, 'a>) -> R,
    {
        self.pool.in_place_scope(|scope| {
            let session = EvaluationSession { scope, simulator };
            op(&session)
        })
    }

    /// Scores every genome in `genomes` and waits for completion.
    pub fn evaluate_all(&self, simulator: &dyn Simulator, genomes: &[Arc<Genome>]) {
        if genomes.is_empty() {
            return;
        }
        self.session(simulator, |session| {
            for genome in genomes {
                session.dispatch(Arc::clone(genome));
            }
        });
    }
}

impl std::fmt::Debug for EvaluationPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationPool")
            .field("workers", &self.workers())
            .finish()
    }
}

/// Handle for queueing genomes during an evaluation phase.
pub struct EvaluationSession<'s, 'a> {
    scope: &'s Scope<'a>,
    simulator: &'a dyn Simulator,
}

impl<'s, 'a> EvaluationSession<'s, 'a> {
    /// Queues `genome` for scoring on the next free worker.
    pub fn dispatch(&self, genome: Arc<Genome>) {
        let simulator = self.simulator;
        self.scope.spawn(move |_| simulator.evaluate(&genome));
    }
}
