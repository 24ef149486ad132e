//! Errors raised by the solver.

use thiserror::Error;
use wardplan_config::ConfigError;
use wardplan_core::ModelError;

/// Failures that stop a solver run.
///
/// Rejected or non-improving moves are never errors; they are part of
/// normal search control flow.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The constructive heuristic found no capacity-feasible placement for a
    /// patient, even after repair and the fallback scan.
    #[error("instance too saturated: no feasible placement for patient {patient}")]
    Saturated { patient: String },

    /// A search that requires a capacity-feasible seed was given one with
    /// excess beds.
    #[error("seed allocation exceeds bed capacity by {bed_violations}")]
    InfeasibleSeed { bed_violations: u64 },

    /// The requested metaheuristic name is not recognized.
    #[error("unknown metaheuristic `{0}`")]
    UnknownStrategy(String),

    /// Invalid instance or allocation, such as an allocation whose size does
    /// not match the patient count.
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
