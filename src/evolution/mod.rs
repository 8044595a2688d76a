pub mod builder;
pub mod dedup;
pub mod engine;
pub mod options;
pub mod pool;
pub mod simulator;

pub use builder::GeneticAlgorithmBuilder;
pub use dedup::DuplicateFilter;
pub use engine::GeneticAlgorithm;
pub use options::{GeneticOptions, GeneticOptionsBuilder};
pub use pool::{EvaluationPool, EvaluationSession};
pub use simulator::{EliteConsumer, NullEliteConsumer, NullSimulator, Simulator};
