use circuitopt::circuit::Circuit;
use circuitopt::config::SimulationConfig;
use circuitopt::data::snapshots::read_vector;
use circuitopt::engines::evaluation::{residence_time, CircuitSimulator};

fn simulator() -> CircuitSimulator {
    CircuitSimulator::new(SimulationConfig::default())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {} but got {}",
        expected,
        actual
    );
}

#[test]
fn test_known_circuit_regressions() {
    let simulator = simulator();

    let five_units = [0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1];
    assert_close(simulator.evaluate(&five_units).performance, 167.378);

    let alternate = [0, 1, 1, 2, 2, 3, 3, 0, 4, 1, 0, 2, 6, 5, 0, 6];
    assert_close(simulator.evaluate(&alternate).performance, -112.007);

    let ten_units = [
        1, 3, 5, 8, 0, 2, 4, 8, 3, 3, 4, 4, 0, 6, 0, 5, 10, 6, 6, 7, 7, 7, 2, 8, 2, 9, 9, 9, 5, 0,
        11,
    ];
    assert_close(simulator.evaluate(&ten_units).performance, -294.262);

    let twenty_five_units = [
        3, 16, 14, 11, 2, 16, 2, 4, 1, 0, 1, 4, 4, 5, 5, 5, 7, 6, 6, 8, 8, 7, 6, 2, 8, 12, 9, 9, 10,
        15, 10, 13, 7, 15, 14, 10, 12, 9, 11, 13, 11, 12, 14, 15, 13, 16, 24, 0, 18, 17, 17, 17, 18,
        18, 26, 20, 24, 19, 21, 20, 20, 22, 4, 21, 25, 19, 22, 19, 21, 23, 0, 22, 24, 23, 23, 1,
    ];
    assert_close(simulator.evaluate(&twenty_five_units).performance, -292.084);
}

#[test]
fn test_circuit_without_concentrate_scores_zero() {
    let outcome = simulator().evaluate(&[0, 1, 0, 2, 3, 1, 2]);
    assert!(outcome.converged);
    assert_eq!(outcome.performance, 0.0);
}

#[test]
fn test_non_convergence_penalty() {
    let outcome = simulator().evaluate(&[0, 1, 1, 2, 3, 0, 1, 1, 1, 1]);

    assert!(!outcome.converged);
    assert_eq!(outcome.iterations, 1000);
    assert_eq!(outcome.performance, -67500.0);
}

#[test]
fn test_penalty_follows_configuration() {
    let config = SimulationConfig {
        max_iterations: 5,
        feed_waste: 50.0,
        penalty: -10.0,
        ..SimulationConfig::default()
    };
    let vector = [0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1];
    let outcome = CircuitSimulator::new(config).evaluate(&vector);

    assert!(!outcome.converged);
    assert_eq!(outcome.performance, -500.0);
}

#[test]
fn test_evaluation_is_deterministic() {
    let simulator = simulator();
    let vector = [0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1];

    let first = simulator.evaluate(&vector);
    for _ in 0..5 {
        assert_eq!(simulator.evaluate(&vector), first);
    }
}

#[test]
fn test_recovery_and_grade_are_fractions() {
    let outcome = simulator().evaluate(&[0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1]);

    assert!(outcome.converged);
    assert!(outcome.recovery > 0.0 && outcome.recovery <= 1.0 + 1e-6);
    assert!(outcome.grade > 0.0 && outcome.grade <= 1.0);
}

#[test]
fn test_run_writes_performance_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("performance.dat");
    let simulator = simulator().with_snapshot(&path);

    let outcome = simulator
        .run(&[0, 1, 3, 2, 4, 4, 3, 1, 3, 6, 1, 1, 0, 5, 1, 1])
        .unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let values: Vec<f64> = contents.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(values, vec![outcome.performance, outcome.recovery, outcome.grade]);
}

#[test]
fn test_evaluate_has_no_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("performance.dat");
    let simulator = simulator().with_snapshot(&path);

    simulator.evaluate(&[0, 1, 0, 2, 3, 1, 2]);
    assert!(!path.exists());
}

#[test]
fn test_residence_time_at_design_feed() {
    let tau = residence_time(&SimulationConfig::default(), 10.0, 90.0);
    assert!((tau - 30.0).abs() < 1e-12);
}

#[test]
fn test_vector_decodes_into_units() {
    let circuit = Circuit::from_vector(&[0, 1, 1, 2, 2, 3, 3, 0, 4, 1, 0, 2, 6, 5, 0, 6]);
    let expected = [[1, 1, 2], [2, 3, 3], [0, 4, 1], [0, 2, 6], [5, 0, 6]];

    assert_eq!(circuit.num_units(), 5);
    for (unit, destinations) in circuit.units.iter().zip(expected) {
        assert_eq!(unit.destinations(), destinations.map(Some));
    }
}

#[test]
fn test_read_vector_round_trips_snapshot_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vector.dat");
    std::fs::write(&path, "0 1 3 2\n").unwrap();

    assert_eq!(read_vector(&path).unwrap(), vec![0, 1, 3, 2]);
}
