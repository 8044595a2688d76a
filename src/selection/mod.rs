pub mod composite;
pub mod roulette;
pub mod selection_strategy;

pub use composite::{ProbabilitySelector, SelectorFunctionProbability};
pub use roulette::{roulette, RouletteSelector};
pub use selection_strategy::{NullSelector, Selector};
