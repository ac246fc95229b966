pub mod evaluator;
pub mod kinetics;
pub mod simulator;

pub use evaluator::CircuitEvaluator;
pub use kinetics::{
    performance, recovery_fractions, residence_time, split_flows, RecoveryFractions, StreamFlows,
};
pub use simulator::{CircuitSimulator, SimulationOutcome};
