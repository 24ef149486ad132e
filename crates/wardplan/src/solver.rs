//! One-call entry points that hide the phase wiring.

use std::path::Path;

use wardplan_config::SolverConfig;
use wardplan_core::Instance;
use wardplan_solver::{run_pipeline, ExactOracle, HybridReport, HybridSolver, PipelineReport, SolveError};

/// File read by [`solve`] when present in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wardplan.toml";

/// Runs the full pipeline with `wardplan.toml` if it exists, defaults
/// otherwise.
///
/// # Errors
///
/// Returns an error if the config file exists but is invalid, or if the
/// instance is too saturated to construct a seed.
pub fn solve(instance: &Instance) -> Result<PipelineReport, SolveError> {
    let config = load_config(DEFAULT_CONFIG_FILE)?;
    solve_with_config(instance, &config)
}

/// Runs the full pipeline with an explicit configuration.
pub fn solve_with_config(
    instance: &Instance,
    config: &SolverConfig,
) -> Result<PipelineReport, SolveError> {
    #[cfg(feature = "console")]
    crate::console::init();

    run_pipeline(instance, config)
}

/// Runs the configured metaheuristic followed by `oracle`.
pub fn solve_hybrid<O: ExactOracle>(
    instance: &Instance,
    config: SolverConfig,
    oracle: O,
) -> Result<HybridReport, SolveError> {
    #[cfg(feature = "console")]
    crate::console::init();

    let mut rng = wardplan_solver::solver_rng(config.random_seed);
    HybridSolver::new(config, oracle).solve(instance, &mut rng)
}

fn load_config(path: impl AsRef<Path>) -> Result<SolverConfig, SolveError> {
    let path = path.as_ref();
    if path.exists() {
        Ok(SolverConfig::load(path)?)
    } else {
        Ok(SolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardplan_test::scenarios;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = load_config("does/not/exist.toml").unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_solve_with_config_runs_pipeline() {
        let mut config = SolverConfig::new().with_random_seed(4);
        config.iterated_local_search.max_iterations = 5;
        config.variable_neighborhood_search.max_iterations = 5;

        let report = solve_with_config(&scenarios::tiny(), &config).unwrap();
        assert_eq!(report.best_allocation.len(), 3);
    }
}
