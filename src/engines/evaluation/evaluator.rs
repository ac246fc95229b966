use crate::engines::evaluation::simulator::CircuitSimulator;
use crate::engines::generation::Evaluator;
use crate::engines::validation::ValidityChecker;

/// Scores circuits for the genetic algorithm: structural validity from the
/// checker, fitness from the simulator's performance.
#[derive(Debug)]
pub struct CircuitEvaluator {
    checker: ValidityChecker,
    simulator: CircuitSimulator,
    record_every_evaluation: bool,
}

impl CircuitEvaluator {
    pub fn new(simulator: CircuitSimulator) -> Self {
        Self {
            checker: ValidityChecker::new(),
            simulator,
            record_every_evaluation: true,
        }
    }

    /// Whether fitness calls write the simulator's performance snapshot.
    /// On by default; a simulator without a snapshot path never writes.
    pub fn recording(mut self, enabled: bool) -> Self {
        self.record_every_evaluation = enabled;
        self
    }

    pub fn simulator(&self) -> &CircuitSimulator {
        &self.simulator
    }
}

impl Evaluator for CircuitEvaluator {
    fn is_valid(&self, individual: &[usize]) -> bool {
        self.checker.is_valid(individual)
    }

    fn fitness(&self, individual: &[usize]) -> f64 {
        let outcome = self.simulator.evaluate(individual);
        if self.record_every_evaluation {
            if let Err(e) = self.simulator.record(&outcome) {
                log::warn!("{}", e);
            }
        }
        outcome.performance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, SimulationConfig};

    #[test]
    fn test_scores_known_circuit() {
        let evaluator = CircuitEvaluator::new(CircuitSimulator::new(SimulationConfig::default()));
        let vector = [0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1];

        assert!(evaluator.is_valid(&vector));
        assert!((evaluator.fitness(&vector) - 167.378).abs() < 1e-3);
    }

    #[test]
    fn test_fitness_writes_snapshot_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance.dat");
        let simulator = CircuitSimulator::new(SimulationConfig::default()).with_snapshot(&path);
        let recording = AppConfig::default().output.record_every_evaluation;
        let evaluator = CircuitEvaluator::new(simulator).recording(recording);

        let fitness = evaluator.fitness(&[0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1]);

        let contents = std::fs::read_to_string(&path).unwrap();
        let values: Vec<f64> = contents.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], fitness);

        // Later calls overwrite the previous snapshot.
        evaluator.fitness(&[0, 1, 0, 2, 3, 1, 2]);
        let first_line = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first_line.lines().next().unwrap().parse::<f64>().unwrap(), 0.0);
    }

    #[test]
    fn test_recording_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("performance.dat");
        let simulator = CircuitSimulator::new(SimulationConfig::default()).with_snapshot(&path);
        let evaluator = CircuitEvaluator::new(simulator).recording(false);

        evaluator.fitness(&[0, 1, 0, 2, 3, 1, 2]);
        assert!(!path.exists());
    }
}
