use circuitopt::config::{
    AppConfig, ConfigManager, ConfigSection, EvolutionConfig, OutputConfig, SimulationConfig,
};
use std::path::PathBuf;

#[test]
fn test_defaults_match_reference_parameters() {
    let config = AppConfig::default();

    assert_eq!(config.evolution.population_size, 100);
    assert_eq!(config.evolution.max_generations, 1000);
    assert_eq!(config.evolution.elitism_count(), 10);
    assert_eq!(config.simulation.price, 100.0);
    assert_eq!(config.simulation.penalty, -750.0);
    assert_eq!(config.simulation.max_iterations, 1000);
    assert_eq!(config.simulation.tolerance, 1e-6);
    assert_eq!(
        config.output.best_vector_path(),
        PathBuf::from("output").join("vector.dat")
    );
    assert!(config.output.record_every_evaluation);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_sections_are_rejected() {
    let rates = EvolutionConfig {
        mutation_rate: 1.5,
        ..EvolutionConfig::default()
    };
    assert!(rates.validate().is_err());

    let no_offspring = EvolutionConfig {
        population_size: 10,
        elitism_rate: 1.0,
        ..EvolutionConfig::default()
    };
    assert!(no_offspring.validate().is_err());

    let density = SimulationConfig {
        density: 0.0,
        ..SimulationConfig::default()
    };
    assert!(density.validate().is_err());

    let output = OutputConfig {
        best_vector_file: String::new(),
        ..OutputConfig::default()
    };
    assert!(output.validate().is_err());

    assert_eq!(EvolutionConfig::section_name(), "evolution");
}

#[test]
fn test_update_rejects_invalid_candidate() {
    let manager = ConfigManager::new();

    manager
        .update(|config| config.evolution.population_size = 500)
        .unwrap();
    assert_eq!(manager.get().evolution.population_size, 500);

    let result = manager.update(|config| config.circuit.units = 0);
    assert!(result.is_err());
    assert_eq!(manager.get().circuit.units, 42);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circuitopt.toml");

    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.circuit.units = 10;
            config.evolution.seed = Some(7);
            config.simulation.price = 120.0;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    assert_eq!(loaded.get(), manager.get());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[evolution]\npopulation_size = 40\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.evolution.population_size, 40);
    assert_eq!(config.evolution.mutation_rate, 0.1);
    assert_eq!(config.simulation, SimulationConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[evolution\npopulation_size = ").unwrap();

    let manager = ConfigManager::new();
    assert!(manager.load_from_file(&path).is_err());
    assert!(manager.load_from_file(dir.path().join("missing.toml")).is_err());
    assert_eq!(manager.get(), AppConfig::default());
}

// The only test in this binary that touches the environment.
#[test]
fn test_layered_loading_applies_file_then_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layered.toml");
    std::fs::write(
        &path,
        "[circuit]\nunits = 12\n\n[evolution]\npopulation_size = 40\n",
    )
    .unwrap();

    std::env::set_var("CIRCUITOPT__EVOLUTION__POPULATION_SIZE", "64");
    let manager = ConfigManager::new();
    let result = manager.load_layered(Some(&path));
    std::env::remove_var("CIRCUITOPT__EVOLUTION__POPULATION_SIZE");
    result.unwrap();

    let config = manager.get();
    assert_eq!(config.circuit.units, 12);
    assert_eq!(config.evolution.population_size, 64);
    assert_eq!(config.evolution.crossover_rate, 0.8);

    // A missing file is not an error for layered loading.
    let fallback = ConfigManager::new();
    fallback
        .load_layered(Some(dir.path().join("absent.toml")))
        .unwrap();
    assert_eq!(fallback.get(), AppConfig::default());
}
