//! The exact-oracle boundary and its warm start.

use std::time::Duration;

use thiserror::Error;
use wardplan_core::{Allocation, Assignment, Instance};
use wardplan_scoring::ObjectiveWeights;

/// Starting values for the oracle's assignment variables.
///
/// For every patient, the chosen (ward, day) is preferred and every other
/// compatible ward and window day is disfavored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmStart {
    entries: Vec<WarmStartEntry>,
}

/// Warm-start values of one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmStartEntry {
    pub patient: usize,
    pub preferred: Assignment,
    pub disfavored: Vec<Assignment>,
}

impl WarmStart {
    pub fn from_allocation(instance: &Instance, allocation: &Allocation) -> Self {
        let entries = allocation
            .iter()
            .map(|(patient, preferred)| {
                let disfavored = instance
                    .compatible_wards(patient)
                    .iter()
                    .flat_map(|&ward| {
                        instance
                            .admission_days(patient)
                            .map(move |day| Assignment::new(ward, day))
                    })
                    .filter(|&a| a != preferred)
                    .collect();
                WarmStartEntry {
                    patient,
                    preferred,
                    disfavored,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WarmStartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn preferred(&self, patient: usize) -> Option<Assignment> {
        self.entries.get(patient).map(|e| e.preferred)
    }

    /// Start value of the variable for (patient, ward, day): `Some(true)` if
    /// preferred, `Some(false)` if disfavored, `None` if the option does not
    /// exist for that patient.
    pub fn value(&self, patient: usize, assignment: Assignment) -> Option<bool> {
        let entry = self.entries.get(patient)?;
        if entry.preferred == assignment {
            Some(true)
        } else if entry.disfavored.contains(&assignment) {
            Some(false)
        } else {
            None
        }
    }

    /// The allocation the warm start prefers.
    pub fn to_allocation(&self) -> Allocation {
        Allocation::new(self.entries.iter().map(|e| e.preferred).collect())
    }
}

/// Everything the oracle receives for one call.
#[derive(Debug, Clone, Copy)]
pub struct OracleRequest<'a> {
    pub instance: &'a Instance,
    pub weights: ObjectiveWeights,
    /// Absent when the metaheuristic result was infeasible.
    pub warm_start: Option<&'a WarmStart>,
    pub time_limit: Duration,
    pub threads: usize,
}

/// How the oracle finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleStatus {
    Optimal,
    /// Stopped by the time limit with an incumbent.
    TimeLimit,
    /// No feasible solution, or the model could not be solved.
    Infeasible,
}

/// The oracle's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSolution {
    pub status: OracleStatus,
    pub allocation: Option<Allocation>,
    /// Objective as reported by the oracle.
    pub objective: Option<f64>,
    /// Relative optimality gap, when known.
    pub gap: Option<f64>,
}

/// Oracle failures. Always recovered by the coordinator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("exact oracle unavailable: {0}")]
    Unavailable(String),

    #[error("exact oracle timed out after {0:?}")]
    TimedOut(Duration),

    #[error("exact oracle failed: {0}")]
    Failed(String),
}

/// An exact solver that can refine an allocation.
pub trait ExactOracle {
    fn solve(&mut self, request: OracleRequest<'_>) -> Result<OracleSolution, OracleError>;
}

impl<O: ExactOracle + ?Sized> ExactOracle for &mut O {
    fn solve(&mut self, request: OracleRequest<'_>) -> Result<OracleSolution, OracleError> {
        (**self).solve(request)
    }
}

impl<O: ExactOracle + ?Sized> ExactOracle for Box<O> {
    fn solve(&mut self, request: OracleRequest<'_>) -> Result<OracleSolution, OracleError> {
        (**self).solve(request)
    }
}
