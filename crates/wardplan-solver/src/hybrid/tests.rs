use wardplan_config::SolverConfig;
use wardplan_core::{Allocation, Assignment};
use wardplan_scoring::{Evaluator, ObjectiveWeights};
use wardplan_test::scenarios;

use super::*;
use crate::error::SolveError;
use crate::random::solver_rng;

enum Response {
    /// Returns the warm-start allocation unchanged, as an optimal answer.
    Echo,
    Unavailable,
    Fixed(Allocation),
}

/// Records every request and answers according to `response`.
struct RecordingOracle {
    calls: usize,
    received: Option<WarmStart>,
    threads: usize,
    response: Response,
}

impl RecordingOracle {
    fn new(response: Response) -> Self {
        Self {
            calls: 0,
            received: None,
            threads: 0,
            response,
        }
    }
}

impl ExactOracle for RecordingOracle {
    fn solve(&mut self, request: OracleRequest<'_>) -> Result<OracleSolution, OracleError> {
        self.calls += 1;
        self.received = request.warm_start.cloned();
        self.threads = request.threads;
        match &self.response {
            Response::Echo => Ok(OracleSolution {
                status: OracleStatus::Optimal,
                allocation: request.warm_start.map(WarmStart::to_allocation),
                objective: None,
                gap: Some(0.0),
            }),
            Response::Unavailable => Err(OracleError::Unavailable("no license".to_string())),
            Response::Fixed(allocation) => Ok(OracleSolution {
                status: OracleStatus::TimeLimit,
                allocation: Some(allocation.clone()),
                objective: None,
                gap: Some(0.05),
            }),
        }
    }
}

fn sa_config() -> SolverConfig {
    let mut config = SolverConfig::new().with_random_seed(17);
    config.simulated_annealing.max_iterations = 300;
    config.hybrid.oracle_threads = 2;
    config
}

#[test]
fn test_warm_start_round_trip() {
    let instance = scenarios::five_patients();
    let config = sa_config();
    let mut rng = solver_rng(config.random_seed);
    let mut oracle = RecordingOracle::new(Response::Echo);

    let report = HybridSolver::new(config, &mut oracle)
        .solve(&instance, &mut rng)
        .unwrap();

    assert!(report.metaheuristic.feasible);
    assert!(report.warm_start_applied);
    assert_eq!(oracle.calls, 1);
    assert_eq!(oracle.threads, 2);

    let warm_start = oracle.received.expect("warm start passed to oracle");
    assert_eq!(
        warm_start,
        WarmStart::from_allocation(&instance, &report.metaheuristic.allocation)
    );
    assert_eq!(warm_start.len(), instance.patient_count());
    for (patient, preferred) in report.metaheuristic.allocation.iter() {
        assert_eq!(warm_start.preferred(patient), Some(preferred));
        assert_eq!(warm_start.value(patient, preferred), Some(true));
    }

    // Echoing the warm start changes nothing.
    assert_eq!(report.oracle_status, Some(OracleStatus::Optimal));
    assert_eq!(report.final_objective, report.metaheuristic.objective);
    assert_eq!(report.improvement_pct, Some(0.0));
    assert_eq!(report.best_allocation, report.metaheuristic.allocation);
}

#[test]
fn test_warm_start_disfavors_other_options() {
    let instance = scenarios::tiny();
    let allocation = Allocation::new(vec![
        Assignment::new(0, 0),
        Assignment::new(0, 1),
        Assignment::new(0, 2),
    ]);
    let warm_start = WarmStart::from_allocation(&instance, &allocation);

    // p0 may be admitted on days 0..=2 in its only ward.
    let entry = &warm_start.entries()[0];
    assert_eq!(entry.preferred, Assignment::new(0, 0));
    assert_eq!(
        entry.disfavored,
        vec![Assignment::new(0, 1), Assignment::new(0, 2)]
    );
    assert_eq!(warm_start.value(0, Assignment::new(0, 2)), Some(false));
    assert_eq!(warm_start.value(1, Assignment::new(0, 3)), None);
    assert_eq!(warm_start.to_allocation(), allocation);
}

#[test]
fn test_unknown_strategy_fails_before_oracle() {
    let instance = scenarios::five_patients();
    let mut config = sa_config();
    config.hybrid.metaheuristic = "genetic".to_string();
    let mut rng = solver_rng(Some(1));
    let mut oracle = RecordingOracle::new(Response::Echo);

    let err = HybridSolver::new(config, &mut oracle)
        .solve(&instance, &mut rng)
        .unwrap_err();

    assert!(matches!(err, SolveError::UnknownStrategy(ref name) if name == "genetic"));
    assert_eq!(oracle.calls, 0);
}

#[test]
fn test_oracle_failure_falls_back_to_metaheuristic() {
    let instance = scenarios::five_patients();
    let mut config = sa_config();
    config.hybrid.metaheuristic = "tabu".to_string();
    config.tabu_search.max_iterations = 50;
    let mut rng = solver_rng(config.random_seed);

    let mut solver = HybridSolver::new(config, RecordingOracle::new(Response::Unavailable));
    let report = solver.solve(&instance, &mut rng).unwrap();

    assert_eq!(solver.oracle().calls, 1);
    assert_eq!(report.strategy, Metaheuristic::TabuSearch);
    assert_eq!(report.oracle_status, None);
    assert_eq!(report.oracle_objective, None);
    assert_eq!(report.improvement_pct, None);
    assert_eq!(report.final_objective, report.metaheuristic.objective);
    assert_eq!(report.best_allocation, report.metaheuristic.allocation);
}

#[test]
fn test_infeasible_result_sends_no_warm_start() {
    let instance = scenarios::saturated();
    let seed = Allocation::new(vec![Assignment::new(0, 0); 3]);
    let config = sa_config();
    let mut rng = solver_rng(config.random_seed);
    let mut oracle = RecordingOracle::new(Response::Echo);

    let report = HybridSolver::new(config, &mut oracle)
        .solve_from(&instance, seed, &mut rng)
        .unwrap();

    assert!(!report.metaheuristic.feasible);
    assert!(!report.warm_start_applied);
    assert_eq!(oracle.calls, 1);
    assert!(oracle.received.is_none());
    assert_eq!(report.oracle_objective, None);
}

#[test]
fn test_better_oracle_answer_is_adopted() {
    let instance = scenarios::two_wards();
    let seed = Allocation::new(vec![Assignment::new(0, 0)]);
    let wide = Allocation::new(vec![Assignment::new(1, 0)]);
    let mut config = SolverConfig::new().with_random_seed(3).with_objective(0.0, 1.0);
    config.simulated_annealing.max_iterations = 0;
    let mut rng = solver_rng(config.random_seed);

    let mut solver = HybridSolver::new(config, RecordingOracle::new(Response::Fixed(wide.clone())));
    let report = solver.solve_from(&instance, seed, &mut rng).unwrap();

    let weights = ObjectiveWeights::new(0.0, 1.0, 1000.0);
    let expected = Evaluator::new(&instance).scalarized(&wide, &weights).unwrap();
    assert!((report.metaheuristic.objective - 10.0).abs() < 1e-9);
    assert_eq!(report.oracle_status, Some(OracleStatus::TimeLimit));
    assert_eq!(report.oracle_objective, Some(expected));
    assert!((report.final_objective - 5.0).abs() < 1e-9);
    assert!((report.improvement_pct.unwrap() - 50.0).abs() < 1e-9);
    assert_eq!(report.gap, Some(0.05));
    assert_eq!(report.best_allocation, wide);
}

#[test]
fn test_seed_of_wrong_size_is_rejected() {
    let instance = scenarios::tiny();
    let mut rng = solver_rng(Some(5));
    let mut solver = HybridSolver::new(sa_config(), RecordingOracle::new(Response::Echo));

    let err = solver
        .solve_from(&instance, Allocation::new(vec![Assignment::new(0, 0)]), &mut rng)
        .unwrap_err();

    assert!(matches!(err, SolveError::Model(_)));
    assert_eq!(solver.oracle().calls, 0);
}
