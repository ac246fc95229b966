use super::traits::{check_positive, ConfigSection};
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};

/// Physical, kinetic and economic constants of the mass-balance model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Solids density (kg/m^3).
    pub density: f64,
    /// Solids volume fraction inside a unit.
    pub solids_fraction: f64,
    /// Unit volume (m^3).
    pub volume: f64,
    pub k_conc_gerardium: f64,
    pub k_inter_gerardium: f64,
    pub k_conc_waste: f64,
    pub k_inter_waste: f64,
    /// Circuit feed rates (kg/s).
    pub feed_gerardium: f64,
    pub feed_waste: f64,
    /// Value per kg of gerardium in the concentrate.
    pub price: f64,
    /// Value per kg of waste in the concentrate (negative).
    pub penalty: f64,
    /// Largest relative change in any unit's inflow accepted as converged.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Circuits with at least this many units update their units on rayon.
    pub parallel_unit_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            density: 3000.0,
            solids_fraction: 0.1,
            volume: 10.0,
            k_conc_gerardium: 0.004,
            k_inter_gerardium: 0.001,
            k_conc_waste: 0.0002,
            k_inter_waste: 0.0003,
            feed_gerardium: 10.0,
            feed_waste: 90.0,
            price: 100.0,
            penalty: -750.0,
            tolerance: 1e-6,
            max_iterations: 1000,
            parallel_unit_threshold: 64,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), CircuitError> {
        check_positive("Density", self.density)?;
        check_positive("Solids fraction", self.solids_fraction)?;
        check_positive("Volume", self.volume)?;
        check_positive("Gerardium feed rate", self.feed_gerardium)?;
        check_positive("Tolerance", self.tolerance)?;
        if self.solids_fraction > 1.0 {
            return Err(CircuitError::Configuration(
                "Solids fraction cannot exceed 1".to_string()
            ));
        }
        let rates = [
            self.k_conc_gerardium,
            self.k_inter_gerardium,
            self.k_conc_waste,
            self.k_inter_waste,
        ];
        if rates.iter().any(|k| *k < 0.0) || self.feed_waste < 0.0 {
            return Err(CircuitError::Configuration(
                "Rate constants and feed rates must not be negative".to_string()
            ));
        }
        if self.max_iterations == 0 {
            return Err(CircuitError::Configuration(
                "Simulation needs at least one iteration".to_string()
            ));
        }
        Ok(())
    }
}
