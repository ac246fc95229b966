use crate::circuit::Circuit;
use crate::config::SimulationConfig;
use crate::data::SnapshotFile;
use crate::engines::evaluation::kinetics::{performance, unit_streams, StreamFlows};
use crate::error::Result;
use crate::types::Destination;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of running a circuit's mass balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Economic score; the fixed non-convergence penalty when `converged` is false.
    pub performance: f64,
    /// Share of the gerardium feed reaching the concentrate outlet.
    pub recovery: f64,
    /// Gerardium mass fraction of the concentrate.
    pub grade: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Fixed-point mass balance over a circuit's units.
///
/// Every iteration each unit splits the flow it received last iteration into
/// six streams and routes them; the loop stops once no unit's inflow changes
/// by more than `tolerance` (relative).
#[derive(Debug)]
pub struct CircuitSimulator {
    config: SimulationConfig,
    snapshot: Option<SnapshotFile>,
}

impl CircuitSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            snapshot: None,
        }
    }

    /// Persist every [`run`](Self::run) result to `path`.
    pub fn with_snapshot<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot = Some(SnapshotFile::new(path));
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate and write the performance snapshot, if one is configured.
    pub fn run(&self, vector: &[usize]) -> Result<SimulationOutcome> {
        let outcome = self.evaluate(vector);
        self.record(&outcome)?;
        Ok(outcome)
    }

    /// Write `outcome` to the performance snapshot. No-op without one.
    pub fn record(&self, outcome: &SimulationOutcome) -> Result<()> {
        match &self.snapshot {
            Some(snapshot) => snapshot.write_performance(outcome),
            None => Ok(()),
        }
    }

    /// Simulate without side effects.
    ///
    /// The vector is expected to be structurally valid; destinations that are
    /// neither units nor the concentrate outlet simply drop their flow.
    pub fn evaluate(&self, vector: &[usize]) -> SimulationOutcome {
        let config = &self.config;
        let mut circuit = Circuit::from_vector(vector);
        let num_units = circuit.num_units();

        // Every unit, not just the feed unit, starts with the full feed.
        for unit in &mut circuit.units {
            unit.reset_flows(config.feed_gerardium, config.feed_waste);
        }

        let mut recovery = 0.0;
        let mut grade = 0.0;

        for iteration in 0..config.max_iterations {
            let streams = self.split_units(&circuit);

            let mut conc_g = 0.0;
            let mut conc_w = 0.0;
            for (index, flows) in streams.iter().enumerate() {
                let [conc_dest, inter_dest, tails_dest] = circuit.units[index].destinations();

                match conc_dest.map(|d| Destination::resolve(d, num_units)) {
                    Some(Destination::Unit(dest)) => {
                        accumulate(&mut circuit, dest, flows.conc_g, flows.conc_w)
                    }
                    Some(Destination::ConcentrateOutlet) => {
                        conc_g += flows.conc_g;
                        conc_w += flows.conc_w;
                    }
                    _ => {}
                }
                if let Some(dest) = inter_dest.filter(|d| *d < num_units) {
                    accumulate(&mut circuit, dest, flows.inter_g, flows.inter_w);
                }
                if let Some(dest) = tails_dest.filter(|d| *d < num_units) {
                    accumulate(&mut circuit, dest, flows.tails_g, flows.tails_w);
                }
            }

            let feed = circuit.feed;
            accumulate(&mut circuit, feed, config.feed_gerardium, config.feed_waste);

            if self.has_converged(&circuit) {
                return SimulationOutcome {
                    performance: performance(config, conc_g, conc_w),
                    recovery,
                    grade,
                    iterations: iteration + 1,
                    converged: true,
                };
            }

            for unit in &mut circuit.units {
                unit.advance();
            }
            recovery = conc_g / config.feed_gerardium;
            grade = conc_g / (conc_g + conc_w);
        }

        log::trace!(
            "circuit did not converge within {} iterations",
            config.max_iterations
        );
        SimulationOutcome {
            performance: config.feed_waste * config.penalty,
            recovery,
            grade,
            iterations: config.max_iterations,
            converged: false,
        }
    }

    /// Per-unit stream split, in unit order. Each unit only reads its own
    /// inflow, so large circuits split on rayon.
    fn split_units(&self, circuit: &Circuit) -> Vec<StreamFlows> {
        let config = &self.config;
        if circuit.num_units() >= config.parallel_unit_threshold {
            circuit
                .units
                .par_iter()
                .map(|unit| unit_streams(config, unit.old_flow_g, unit.old_flow_w))
                .collect()
        } else {
            circuit
                .units
                .iter()
                .map(|unit| unit_streams(config, unit.old_flow_g, unit.old_flow_w))
                .collect()
        }
    }

    fn has_converged(&self, circuit: &Circuit) -> bool {
        let tolerance = self.config.tolerance;
        circuit.units.iter().all(|unit| {
            let diff_g = (unit.new_flow_g - unit.old_flow_g).abs() / unit.old_flow_g;
            let diff_w = (unit.new_flow_w - unit.old_flow_w).abs() / unit.old_flow_w;
            // NaN (0/0 on a unit that never receives flow) does not block convergence.
            let changing = diff_g > tolerance || diff_w > tolerance;
            !changing
        })
    }
}

fn accumulate(circuit: &mut Circuit, dest: usize, flow_g: f64, flow_w: f64) {
    if let Some(unit) = circuit.units.get_mut(dest) {
        unit.new_flow_g += flow_g;
        unit.new_flow_w += flow_w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_and_serial_splits_agree() {
        let vector = vec![0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1];
        let serial = CircuitSimulator::new(SimulationConfig::default());
        let parallel = CircuitSimulator::new(SimulationConfig {
            parallel_unit_threshold: 1,
            ..SimulationConfig::default()
        });

        assert_eq!(serial.evaluate(&vector), parallel.evaluate(&vector));
    }

    #[test]
    fn test_empty_circuit_converges_immediately() {
        let simulator = CircuitSimulator::new(SimulationConfig::default());
        let outcome = simulator.evaluate(&[0]);

        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.performance, 0.0);
    }
}
