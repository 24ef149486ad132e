//! Wardplan - heuristic admission planning in Rust
//!
//! Assigns elective patients to a (ward, admission day) pair, trading off
//! delay and operating-theatre cost against the peak normalized ward
//! workload.
//!
//! # Example
//!
//! ```rust
//! use wardplan::prelude::*;
//!
//! let weights = ObjectiveWeights::default();
//! let objective = Objective::new(4.0, 2.0);
//! assert_eq!(weights.scalarize(objective), 3.0);
//! ```

pub use wardplan_core::{
    Allocation, Assignment, CostWeights, Instance, InstanceData, ModelError, Patient,
    Specialization, Ward,
};

pub use wardplan_scoring::{Evaluation, Evaluator, Objective, ObjectiveWeights, ScoreDirector};

pub use wardplan_config::{ConfigError, SolverConfig};

pub use wardplan_solver::{
    run_pipeline, solver_rng, Construction, ExactOracle, HybridReport, HybridSolver,
    IteratedLocalSearch, LocalImprovement, Metaheuristic, OracleError, OracleRequest,
    OracleSolution, OracleStatus, PipelineReport, Search, SearchOutcome, SimulatedAnnealing,
    SolveError, SolverRng, TabuSearch, VariableNeighborhoodSearch, WarmStart,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{solve, solve_hybrid, solve_with_config, DEFAULT_CONFIG_FILE};

pub mod prelude {
    pub use super::{Allocation, Assignment, Instance, Objective, ObjectiveWeights};
    pub use super::{ExactOracle, Metaheuristic, Search, SolveError, SolverConfig};
    pub use super::{solve, solve_hybrid, solve_with_config};
}
