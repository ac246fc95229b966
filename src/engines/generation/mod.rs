pub mod evolution_engine;
pub mod genome;
pub mod operators;
pub mod population;
pub mod progress;
pub mod traits;

pub use evolution_engine::{
    optimize, EvolutionEngine, EvolutionOutcome, GenerationStats, ProgressCallback,
};
pub use genome::Genome;
pub use progress::ConsoleProgressCallback;
pub use traits::{Evaluator, FnEvaluator};
