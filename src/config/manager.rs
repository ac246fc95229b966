use super::{
    circuit::CircuitConfig,
    evolution::EvolutionConfig,
    output::OutputConfig,
    simulation::SimulationConfig,
    traits::ConfigSection,
};
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix of environment overrides, e.g. `CIRCUITOPT__EVOLUTION__POPULATION_SIZE=500`.
pub const ENV_PREFIX: &str = "CIRCUITOPT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub circuit: CircuitConfig,
    pub evolution: EvolutionConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CircuitError> {
        self.circuit.validate()?;
        self.evolution.validate()?;
        self.simulation.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CircuitError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CircuitError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| CircuitError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    /// Defaults, then the optional file, then `CIRCUITOPT__SECTION__KEY`
    /// environment variables.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), CircuitError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| CircuitError::Configuration(format!("Failed to load config: {}", e)))?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CircuitError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| CircuitError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CircuitError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` and keep the result only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<(), CircuitError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), CircuitError> {
        config.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }
}
