//! Construction, descent and metaheuristic phases.
//!
//! Every phase scores allocations through [`wardplan_scoring`], so their
//! objectives are directly comparable.

mod annealing;
mod construction;
mod fast_local_search;
mod ils;
mod local_improvement;
mod tabu;
mod vns;

pub use annealing::SimulatedAnnealing;
pub use construction::Construction;
pub use fast_local_search::FastLocalSearch;
pub use ils::{perturb, IteratedLocalSearch};
pub use local_improvement::LocalImprovement;
pub use tabu::{select_candidate, Candidate, TabuList, TabuSearch};
pub use vns::{shake, NeighborhoodIndex, VariableNeighborhoodSearch};

use wardplan_core::{Allocation, Instance};
use wardplan_scoring::ScoreDirector;

use crate::error::SolveError;
use crate::random::SolverRng;
use crate::statistics::SearchOutcome;

/// Margin a new objective must beat the old one by to count as better.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A metaheuristic that improves a seed allocation.
pub trait Search {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Runs the search from `initial` and returns the best allocation found.
    fn search(
        &self,
        instance: &Instance,
        initial: Allocation,
        rng: &mut SolverRng,
    ) -> Result<SearchOutcome, SolveError>;
}

/// Best allocation seen so far, independent of the search trajectory.
///
/// A feasible allocation always ranks above an infeasible one; within the
/// same class the lower scalarized objective wins.
#[derive(Debug, Clone)]
pub(crate) struct BestTracker {
    allocation: Allocation,
    score: f64,
    feasible: bool,
}

impl BestTracker {
    pub(crate) fn new(director: &ScoreDirector<'_>) -> Self {
        Self {
            allocation: director.clone_allocation(),
            score: director.score(),
            feasible: director.is_feasible(),
        }
    }

    /// Snapshots the director's allocation if it ranks above the current
    /// best. Returns true on replacement.
    pub(crate) fn offer(&mut self, director: &ScoreDirector<'_>, score: f64) -> bool {
        let feasible = director.is_feasible();
        let better = match (feasible, self.feasible) {
            (true, false) => true,
            (false, true) => false,
            _ => score + IMPROVEMENT_EPSILON < self.score,
        };
        if better {
            self.allocation = director.clone_allocation();
            self.score = score;
            self.feasible = feasible;
        }
        better
    }

    pub(crate) fn score(&self) -> f64 {
        self.score
    }

    pub(crate) fn is_feasible(&self) -> bool {
        self.feasible
    }

    pub(crate) fn into_allocation(self) -> Allocation {
        self.allocation
    }
}

/// Scalarized objective of the director's allocation, or infinity if any
/// hard constraint is broken.
///
/// Searches that walk the neighborhood without a feasibility filter rank
/// their candidates with this, so an infeasible neighbor never looks better
/// than a feasible one.
pub(crate) fn feasible_score(director: &ScoreDirector<'_>) -> f64 {
    if director.is_feasible() {
        director.score()
    } else {
        f64::INFINITY
    }
}

/// Rejects seeds with excess beds.
pub(crate) fn require_capacity_feasible(director: &ScoreDirector<'_>) -> Result<(), SolveError> {
    if director.is_capacity_feasible() {
        Ok(())
    } else {
        Err(SolveError::InfeasibleSeed {
            bed_violations: director.bed_violations(),
        })
    }
}
