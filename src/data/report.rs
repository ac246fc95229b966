use super::snapshots::overwrite;
use crate::engines::evaluation::SimulationOutcome;
use crate::error::Result;
use crate::types::CircuitVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one optimisation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub units: usize,
    pub generations: usize,
    pub population_size: usize,
    pub best_fitness: f64,
    pub best_vector: CircuitVector,
    pub best_is_valid: bool,
    pub simulation: SimulationOutcome,
    /// Best fitness of each generation.
    pub history: Vec<f64>,
}

impl RunReport {
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        overwrite(path.as_ref(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let now = Utc::now();
        let report = RunReport {
            started_at: now,
            finished_at: now,
            elapsed_secs: 0.5,
            units: 3,
            generations: 2,
            population_size: 10,
            best_fitness: 12.5,
            best_vector: vec![0, 1, 2, 4, 3, 0, 2, 0, 1, 4],
            best_is_valid: true,
            simulation: SimulationOutcome {
                performance: 12.5,
                recovery: 0.4,
                grade: 0.3,
                iterations: 17,
                converged: true,
            },
            history: vec![10.0, 12.5],
        };

        report.write(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["units"], 3);
        assert_eq!(json["best_vector"][3], 4);
        assert_eq!(json["simulation"]["iterations"], 17);
        assert_eq!(json["history"].as_array().unwrap().len(), 2);
    }
}
