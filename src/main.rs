use anyhow::Context;
use chrono::Utc;
use circuitopt::config::ConfigManager;
use circuitopt::data::RunReport;
use circuitopt::engines::evaluation::{CircuitEvaluator, CircuitSimulator};
use circuitopt::engines::generation::{optimize, ConsoleProgressCallback};
use circuitopt::engines::validation::ValidityChecker;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional TOML file; CIRCUITOPT__<SECTION>__<KEY> variables override it.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let manager = ConfigManager::new();
    manager
        .load_layered(config_path.as_deref())
        .context("Failed to load configuration")?;
    let config = manager.get();

    log::info!(
        "Optimising a {}-unit circuit: population {}, {} generations",
        config.circuit.units,
        config.evolution.population_size,
        config.evolution.max_generations
    );

    let started_at = Utc::now();
    let timer = Instant::now();

    let output = &config.output;
    let simulator = CircuitSimulator::new(config.simulation.clone())
        .with_snapshot(output.performance_path());
    let evaluator = CircuitEvaluator::new(simulator).recording(output.record_every_evaluation);

    let best_vector_path = output.best_vector_path();
    let mut progress = ConsoleProgressCallback::default();
    let outcome = optimize(
        config.circuit.units,
        &evaluator,
        &config.evolution,
        Some(best_vector_path.as_path()),
        &mut progress,
    )
    .context("Optimisation failed")?;

    let best_is_valid = ValidityChecker::new().is_valid(&outcome.best_individual);
    if !best_is_valid {
        log::warn!("Best individual is not a valid circuit");
    }
    let simulation = evaluator
        .simulator()
        .run(&outcome.best_individual)
        .context("Failed to write performance snapshot")?;

    log::info!(
        "Best circuit: performance {:.4}, recovery {:.4}, grade {:.4}",
        simulation.performance,
        simulation.recovery,
        simulation.grade
    );
    log::info!("Best vector written to {}", best_vector_path.display());

    let report = RunReport {
        started_at,
        finished_at: Utc::now(),
        elapsed_secs: timer.elapsed().as_secs_f64(),
        units: config.circuit.units,
        generations: outcome.history.len(),
        population_size: outcome.population.len(),
        best_fitness: outcome.best_fitness,
        best_vector: outcome.best_individual.clone(),
        best_is_valid,
        simulation,
        history: outcome.history,
    };
    report
        .write(output.report_path())
        .context("Failed to write run report")?;

    Ok(())
}
