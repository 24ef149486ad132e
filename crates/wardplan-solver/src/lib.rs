//! Allocation heuristics for assigning patients to (ward, day) pairs.
//!
//! This crate provides:
//! - A deterministic constructive heuristic with congestion repair
//! - A greedy descent shared as the seed of every metaheuristic
//! - Simulated annealing, tabu search, iterated local search and variable
//!   neighborhood search, all scored by the same evaluator
//! - A hybrid coordinator that hands the best allocation to an exact
//!   oracle as a warm start
//! - [`run_pipeline`], the full greedy to VNS chain on one instance
//!
//! Every component receives its configuration section and objective
//! weights explicitly. Randomized components draw from a caller-provided
//! [`SolverRng`].

pub mod error;
pub mod heuristic;
pub mod hybrid;
pub mod phase;
pub mod pipeline;
pub mod random;
pub mod statistics;
pub mod termination;

pub use error::SolveError;
pub use heuristic::Move;
pub use hybrid::{
    ExactOracle, HybridReport, HybridSolver, Metaheuristic, OracleError, OracleRequest,
    OracleSolution, OracleStatus, WarmStart, WarmStartEntry,
};
pub use phase::{
    Construction, FastLocalSearch, IteratedLocalSearch, LocalImprovement, Search,
    SimulatedAnnealing, TabuSearch, VariableNeighborhoodSearch,
};
pub use pipeline::{run_pipeline, PipelineReport, StageSummary};
pub use random::{solver_rng, SolverRng};
pub use statistics::{Improvement, SearchOutcome, SearchStatistics};
pub use termination::Deadline;
