pub mod traits;
pub mod circuit;
pub mod evolution;
pub mod simulation;
pub mod output;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use circuit::CircuitConfig;
pub use evolution::EvolutionConfig;
pub use simulation::SimulationConfig;
pub use output::OutputConfig;
pub use traits::ConfigSection;
