use super::traits::{check_unit_interval, ConfigSection};
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_rate: f64,
    pub seed: Option<u64>,

    /// Improvements of the generation best smaller than this count as stagnation.
    pub stagnation_threshold: f64,
    /// Stagnant generations tolerated before the population is partly regenerated.
    pub stagnation_limit: usize,
    /// Fraction of the (ranked) population kept when regenerating.
    pub regeneration_keep_fraction: f64,
    /// Stagnation, as a fraction of `max_generations`, after which uniform
    /// mutation is boosted.
    pub mutation_boost_onset: f64,
    pub mutation_boost_step: f64,
    pub mutation_boost_cap: f64,
    /// Fill level after which random individuals are admitted without passing
    /// the validity check.
    pub invalid_admission_fraction: f64,
    /// Shape exponent of the generation-decaying non-uniform mutation.
    pub non_uniform_shape: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            elitism_rate: 0.1,
            seed: None,
            stagnation_threshold: 0.1,
            stagnation_limit: 50,
            regeneration_keep_fraction: 0.2,
            mutation_boost_onset: 0.1,
            mutation_boost_step: 0.001,
            mutation_boost_cap: 0.5,
            invalid_admission_fraction: 0.8,
            non_uniform_shape: 5.0,
        }
    }
}

impl EvolutionConfig {
    /// Number of ranked individuals copied unchanged into each generation.
    pub fn elitism_count(&self) -> usize {
        (self.population_size as f64 * self.elitism_rate) as usize
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), CircuitError> {
        if self.population_size < 2 {
            return Err(CircuitError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.max_generations == 0 {
            return Err(CircuitError::Configuration(
                "At least one generation is required".to_string()
            ));
        }
        check_unit_interval("Mutation rate", self.mutation_rate)?;
        check_unit_interval("Crossover rate", self.crossover_rate)?;
        check_unit_interval("Elitism rate", self.elitism_rate)?;
        check_unit_interval("Regeneration keep fraction", self.regeneration_keep_fraction)?;
        check_unit_interval("Mutation boost onset", self.mutation_boost_onset)?;
        check_unit_interval("Mutation boost cap", self.mutation_boost_cap)?;
        check_unit_interval("Invalid admission fraction", self.invalid_admission_fraction)?;
        if self.elitism_count() >= self.population_size {
            return Err(CircuitError::Configuration(
                "Elitism must leave room for offspring".to_string()
            ));
        }
        if self.stagnation_threshold < 0.0 || self.mutation_boost_step < 0.0 {
            return Err(CircuitError::Configuration(
                "Stagnation threshold and mutation boost step must not be negative".to_string()
            ));
        }
        if self.non_uniform_shape <= 0.0 {
            return Err(CircuitError::Configuration(
                "Non-uniform mutation shape must be positive".to_string()
            ));
        }
        Ok(())
    }
}
