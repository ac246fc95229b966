use super::traits::ConfigSection;
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Number of separation units in the circuits being searched.
    pub units: usize,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self { units: 42 }
    }
}

impl ConfigSection for CircuitConfig {
    fn section_name() -> &'static str {
        "circuit"
    }

    fn validate(&self) -> Result<(), CircuitError> {
        if self.units == 0 {
            return Err(CircuitError::Configuration(
                "A circuit needs at least one unit".to_string()
            ));
        }
        Ok(())
    }
}
