//! Tabu search over sampled random neighbors.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, info, trace};
use wardplan_config::TabuSearchConfig;
use wardplan_core::{Allocation, Instance};
use wardplan_scoring::{ObjectiveWeights, ScoreDirector};

use super::{feasible_score, BestTracker, Search};
use crate::error::SolveError;
use crate::heuristic::{random_move, Move};
use crate::random::SolverRng;
use crate::statistics::{SearchOutcome, SearchStatistics};

/// Recently visited allocations, oldest first.
#[derive(Debug, Clone)]
pub struct TabuList {
    tenure: usize,
    visited: VecDeque<Allocation>,
}

impl TabuList {
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            visited: VecDeque::with_capacity(tenure + 1),
        }
    }

    pub fn contains(&self, allocation: &Allocation) -> bool {
        self.visited.contains(allocation)
    }

    /// Records a visit, forgetting the oldest beyond the tenure.
    pub fn push(&mut self, allocation: Allocation) {
        self.visited.push_back(allocation);
        while self.visited.len() > self.tenure {
            self.visited.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// A scored neighbor of the current allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    pub score: f64,
    /// The neighbor is in the tabu list.
    pub tabu: bool,
}

/// Index of the neighbor to move to.
///
/// Candidates must be sorted by score, best first. The first non-tabu one
/// wins, unless aspiration lets an earlier tabu one through by beating
/// `best_score`. Candidates scored as infinity are infeasible and never
/// chosen. Returns `None` when no candidate qualifies.
pub fn select_candidate(candidates: &[Candidate], best_score: f64, aspiration: bool) -> Option<usize> {
    candidates
        .iter()
        .position(|c| c.score.is_finite() && (!c.tabu || (aspiration && c.score < best_score)))
}

/// Tabu search on the scalarized objective.
///
/// Each iteration samples a fixed number of random neighbors of the current
/// allocation, sorts them by objective and moves to the best feasible one
/// that is not tabu. The tabu list holds the allocations most recently moved to. A tabu
/// neighbor is still taken when it beats the best objective seen, if
/// aspiration is enabled.
#[derive(Debug, Clone)]
pub struct TabuSearch {
    config: TabuSearchConfig,
    weights: ObjectiveWeights,
}

impl TabuSearch {
    pub fn new(config: TabuSearchConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }

    fn sample_neighbors(
        &self,
        director: &mut ScoreDirector<'_>,
        tabu: &TabuList,
        rng: &mut SolverRng,
    ) -> Vec<Candidate> {
        let instance = director.instance();
        let mut candidates = Vec::with_capacity(self.config.neighbor_sample_size);
        for _ in 0..self.config.neighbor_sample_size {
            let Some(mv) = random_move(instance, director.allocation(), rng) else {
                break;
            };
            let mut trial = director.trial();
            mv.apply(&mut trial);
            candidates.push(Candidate {
                mv,
                score: feasible_score(&trial),
                tabu: tabu.contains(trial.allocation()),
            });
        }
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        candidates
    }
}

impl Search for TabuSearch {
    fn name(&self) -> &'static str {
        "Tabu Search"
    }

    fn search(
        &self,
        instance: &Instance,
        initial: Allocation,
        rng: &mut SolverRng,
    ) -> Result<SearchOutcome, SolveError> {
        let start = Instant::now();
        let mut director = ScoreDirector::new(instance, self.weights, initial)?;
        let mut stats = SearchStatistics::new();
        let mut best = BestTracker::new(&director);
        if best.is_feasible() {
            stats.record_improvement(0, start.elapsed(), best.score());
        }
        let mut tabu = TabuList::new(self.config.tenure);

        info!(
            event = "phase_start",
            phase = self.name(),
            objective = best.score(),
            tenure = self.config.tenure,
        );

        for iteration in 1..=self.config.max_iterations {
            stats.iterations = iteration;
            let candidates = self.sample_neighbors(&mut director, &tabu, rng);
            stats.moves_evaluated += candidates.len() as u64;

            let Some(chosen) = select_candidate(&candidates, best.score(), self.config.aspiration)
            else {
                trace!(event = "step", step = iteration, accepted = false);
                continue;
            };
            let candidate = candidates[chosen];

            let mut trial = director.trial();
            candidate.mv.apply(&mut trial);
            trial.commit();
            tabu.push(director.clone_allocation());
            stats.moves_accepted += 1;
            trace!(
                event = "step",
                step = iteration,
                score = candidate.score,
                tabu = candidate.tabu,
                accepted = true,
            );

            if best.offer(&director, candidate.score) {
                if best.is_feasible() {
                    stats.record_improvement(iteration, start.elapsed(), candidate.score);
                }
                debug!(event = "new_best", step = iteration, score = candidate.score);
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "phase_end",
            phase = self.name(),
            duration_ms = elapsed.as_millis() as u64,
            steps = stats.iterations,
            objective = best.score(),
        );
        Ok(SearchOutcome::evaluate(
            instance,
            &self.weights,
            best.into_allocation(),
            elapsed,
            stats,
        )?)
    }
}
