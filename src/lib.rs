//! Search for high-value mineral separation circuits.
//!
//! A circuit is encoded as a flat vector of unit destinations
//! ([`types::CircuitVector`]). [`engines::validation`] decides whether an
//! encoding describes a usable circuit, [`engines::evaluation`] simulates its
//! steady-state mass balance and prices the concentrate, and
//! [`engines::generation`] evolves encodings towards the best price.

pub mod circuit;
pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use circuit::{default_seed, Circuit};
pub use engines::evaluation::{CircuitEvaluator, CircuitSimulator, SimulationOutcome};
pub use engines::generation::{optimize, EvolutionOutcome};
pub use engines::validation::{is_valid, ValidityChecker, Violation};
pub use error::{CircuitError, Result};
