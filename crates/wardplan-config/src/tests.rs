//! Tests for solver configuration.

use super::*;

#[test]
fn test_defaults() {
    let config = SolverConfig::default();

    assert_eq!(config.random_seed, None);
    assert_eq!(config.objective.lambda_cost, 0.5);
    assert_eq!(config.objective.capacity_penalty, 1000.0);
    assert_eq!(config.construction.repair_candidates, 3);
    assert_eq!(config.local_improvement.max_rounds, 6);
    assert_eq!(config.simulated_annealing.cooling_rate, 0.95);
    assert_eq!(config.tabu_search.neighbor_sample_size, 20);
    assert_eq!(config.iterated_local_search.local_search.rounds, 10);
    assert_eq!(config.variable_neighborhood_search.local_search.rounds, 5);
    assert_eq!(config.variable_neighborhood_search.k_max, 4);
    assert_eq!(config.hybrid.metaheuristic, "sa");
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        random_seed = 42

        [objective]
        lambda_cost = 1.0
        lambda_balance = 0.0

        [simulated_annealing]
        initial_temperature = 50.0
        cooling_rate = 0.9

        [iterated_local_search]
        stagnation_limit = 5

        [iterated_local_search.local_search]
        rounds = 3

        [hybrid]
        metaheuristic = "tabu"
        oracle_seconds_limit = 60
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.objective.weights().lambda_balance, 0.0);
    assert_eq!(config.simulated_annealing.initial_temperature, 50.0);
    assert_eq!(config.simulated_annealing.max_iterations, 10_000);
    assert_eq!(config.iterated_local_search.stagnation_limit, 5);
    assert_eq!(config.iterated_local_search.local_search.rounds, 3);
    assert_eq!(config.iterated_local_search.local_search.days_per_patient, 3);
    assert_eq!(config.hybrid.metaheuristic, "tabu");
    assert_eq!(config.hybrid.oracle_time_limit(), Duration::from_secs(60));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        random_seed: 42
        tabu_search:
          tenure: 10
          aspiration: false
        variable_neighborhood_search:
          k_max: 2
          day_shifts: [-1, 1]
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.tabu_search.tenure, 10);
    assert!(!config.tabu_search.aspiration);
    assert_eq!(config.variable_neighborhood_search.k_max, 2);
    assert_eq!(config.variable_neighborhood_search.day_shifts, vec![-1, 1]);
}

#[test]
fn test_rejects_cooling_rate_outside_unit_interval() {
    let err = SolverConfig::from_toml_str(
        r#"
        [simulated_annealing]
        cooling_rate = 1.0
    "#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_rejects_inverted_perturbation_bounds() {
    let mut config = SolverConfig::default();
    config.iterated_local_search.perturbation_base = 0.5;
    config.iterated_local_search.perturbation_max = 0.2;

    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_rejects_zero_tenure_and_k_max() {
    let mut config = SolverConfig::default();
    config.tabu_search.tenure = 0;
    assert!(config.validate().is_err());

    let mut config = SolverConfig::default();
    config.variable_neighborhood_search.k_max = 0;
    assert!(config.validate().is_err());

    let mut config = SolverConfig::default();
    config.variable_neighborhood_search.k_max = 5;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_negative_lambda() {
    let config = SolverConfig::default().with_objective(-1.0, 0.5);

    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_zero_shift() {
    let yaml = r#"
        variable_neighborhood_search:
          day_shifts: [0, 1]
    "#;

    assert!(SolverConfig::from_yaml_str(yaml).is_err());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = SolverConfig::load("/nonexistent/wardplan.toml").unwrap_err();

    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder_methods() {
    let config = SolverConfig::new()
        .with_random_seed(9)
        .with_objective(0.0, 1.0);

    assert_eq!(config.random_seed, Some(9));
    assert_eq!(config.objective.lambda_cost, 0.0);
    assert_eq!(config.objective.lambda_balance, 1.0);
}
