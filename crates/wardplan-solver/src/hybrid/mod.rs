//! Hand-off from a metaheuristic to an exact oracle.
//!
//! The oracle is anything implementing [`ExactOracle`]: a MILP solver
//! binding, a remote service, or a test double. The coordinator works
//! without it; any oracle failure falls back to the metaheuristic result.

mod coordinator;
mod oracle;
mod strategy;

pub use coordinator::{HybridReport, HybridSolver};
pub use oracle::{
    ExactOracle, OracleError, OracleRequest, OracleSolution, OracleStatus, WarmStart,
    WarmStartEntry,
};
pub use strategy::Metaheuristic;

#[cfg(test)]
mod tests;
