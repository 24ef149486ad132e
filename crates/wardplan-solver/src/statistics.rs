//! Search statistics and results.
//!
//! Every search strategy returns a [`SearchOutcome`]: the best allocation it
//! found, the shared evaluator's verdict on it, and the counters collected
//! along the way.

use std::time::Duration;

use wardplan_core::{Allocation, Instance, ModelError};
use wardplan_scoring::{Evaluation, Evaluator, ObjectiveWeights};

/// Record of a best-objective improvement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Improvement {
    /// Iteration at which the new best was found.
    pub iteration: u64,
    /// Time since the search started.
    pub time_offset: Duration,
    /// The new best scalarized objective.
    pub objective: f64,
}

/// Counters for one search run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    pub iterations: u64,
    /// Candidate moves scored.
    pub moves_evaluated: u64,
    /// Candidate moves kept.
    pub moves_accepted: u64,
    /// Best-objective history. Each entry is lower than the one before.
    pub improvements: Vec<Improvement>,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the history if `objective` beats the last recorded best.
    pub fn record_improvement(&mut self, iteration: u64, time_offset: Duration, objective: f64) {
        if self
            .best_objective()
            .is_some_and(|best| objective >= best)
        {
            return;
        }
        self.improvements.push(Improvement {
            iteration,
            time_offset,
            objective,
        });
    }

    /// Last recorded best objective.
    pub fn best_objective(&self) -> Option<f64> {
        self.improvements.last().map(|i| i.objective)
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Result of one search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best allocation found. Always one assignment per patient.
    pub allocation: Allocation,
    /// Scalarized objective of `allocation`.
    pub objective: f64,
    pub evaluation: Evaluation,
    /// Window, capacity and compatibility all hold for `allocation`.
    pub feasible: bool,
    pub elapsed: Duration,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    /// Scores `allocation` with the shared evaluator.
    ///
    /// Fails if `allocation` does not hold one assignment per patient.
    pub fn evaluate(
        instance: &Instance,
        weights: &ObjectiveWeights,
        allocation: Allocation,
        elapsed: Duration,
        statistics: SearchStatistics,
    ) -> Result<Self, ModelError> {
        let evaluation = Evaluator::new(instance).evaluate(&allocation)?;
        Ok(Self {
            objective: weights.scalarize(evaluation.objective),
            feasible: evaluation.is_feasible(),
            evaluation,
            allocation,
            elapsed,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_improvement_keeps_history_decreasing() {
        let mut stats = SearchStatistics::new();
        stats.record_improvement(0, Duration::ZERO, 10.0);
        stats.record_improvement(1, Duration::ZERO, 12.0);
        stats.record_improvement(2, Duration::ZERO, 10.0);
        stats.record_improvement(3, Duration::ZERO, 7.5);

        let objectives: Vec<f64> = stats.improvements.iter().map(|i| i.objective).collect();
        assert_eq!(objectives, vec![10.0, 7.5]);
        assert_eq!(stats.best_objective(), Some(7.5));
    }

    #[test]
    fn test_acceptance_rate() {
        let stats = SearchStatistics {
            moves_evaluated: 8,
            moves_accepted: 2,
            ..SearchStatistics::default()
        };
        assert_eq!(stats.acceptance_rate(), 0.25);
        assert_eq!(SearchStatistics::new().acceptance_rate(), 0.0);
    }
}
