use super::traits::ConfigSection;
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub performance_file: String,
    pub best_vector_file: String,
    pub report_file: String,
    /// Write the performance snapshot on every fitness evaluation. When off,
    /// only explicit simulator runs write it.
    pub record_every_evaluation: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            performance_file: "performance.dat".to_string(),
            best_vector_file: "vector.dat".to_string(),
            report_file: "report.json".to_string(),
            record_every_evaluation: true,
        }
    }
}

impl OutputConfig {
    pub fn performance_path(&self) -> PathBuf {
        self.directory.join(&self.performance_file)
    }

    pub fn best_vector_path(&self) -> PathBuf {
        self.directory.join(&self.best_vector_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.directory.join(&self.report_file)
    }
}

impl ConfigSection for OutputConfig {
    fn section_name() -> &'static str {
        "output"
    }

    fn validate(&self) -> Result<(), CircuitError> {
        let names = [&self.performance_file, &self.best_vector_file, &self.report_file];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(CircuitError::Configuration(
                "Output file names must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
