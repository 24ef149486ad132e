//! Variable neighborhood search with four shake neighborhoods.

use rand::seq::{index, IndexedRandom, IteratorRandom};
use rand::Rng;
use tracing::{debug, info, trace};
use wardplan_config::VariableNeighborhoodSearchConfig;
use wardplan_core::{Allocation, Instance};
use wardplan_scoring::{ObjectiveWeights, ScoreDirector};

use super::fast_local_search::FastLocalSearch;
use super::{require_capacity_feasible, Search, IMPROVEMENT_EPSILON};
use crate::error::SolveError;
use crate::random::SolverRng;
use crate::statistics::{SearchOutcome, SearchStatistics};
use crate::termination::Deadline;

/// Index of the active shake neighborhood, from 1 to `k_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodIndex {
    k: usize,
    k_max: usize,
}

impl NeighborhoodIndex {
    pub fn new(k_max: usize) -> Self {
        Self {
            k: 1,
            k_max: k_max.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.k
    }

    /// Back to the first neighborhood after an improvement, on to the next
    /// one otherwise, wrapping to 1 past `k_max`.
    pub fn update(&mut self, improved: bool) -> usize {
        self.k = if improved || self.k >= self.k_max {
            1
        } else {
            self.k + 1
        };
        self.k
    }
}

/// Perturbs a copy of `allocation` in neighborhood `k`.
///
/// - N1: shift one random patient's day by a random offset from
///   `day_shifts`, if the new day stays in its window
/// - N2: move one random patient to another compatible ward
/// - N3: for two random patients, a coin flip picks a new random window day
///   or a random compatible ward
/// - N4 (and any larger `k`): swap the (ward, day) pairs of two random
///   patients if each fits the other's ward and window
///
/// Moves that would break a window or compatibility are skipped, so the
/// result may equal the input.
pub fn shake(
    instance: &Instance,
    allocation: &Allocation,
    k: usize,
    day_shifts: &[i64],
    rng: &mut SolverRng,
) -> Allocation {
    let mut shaken = allocation.clone();
    let count = instance.patient_count();
    if count == 0 {
        return shaken;
    }

    match k {
        1 => {
            let patient = rng.random_range(0..count);
            let current = shaken.get(patient);
            if let Some(&shift) = day_shifts.choose(rng) {
                let day = current.day as i64 + shift;
                if day >= 0 && instance.admits(patient, day as usize) {
                    shaken.set(patient, current.with_day(day as usize));
                }
            }
        }
        2 => {
            let patient = rng.random_range(0..count);
            let current = shaken.get(patient);
            if let Some(ward) = instance
                .compatible_wards(patient)
                .iter()
                .copied()
                .filter(|&w| w != current.ward)
                .choose(rng)
            {
                shaken.set(patient, current.with_ward(ward));
            }
        }
        3 => {
            for patient in index::sample(rng, count, count.min(2)) {
                let current = shaken.get(patient);
                if rng.random_bool(0.5) {
                    let day = rng.random_range(instance.admission_days(patient));
                    shaken.set(patient, current.with_day(day));
                } else {
                    let wards = instance.compatible_wards(patient);
                    if wards.len() > 1 {
                        if let Some(&ward) = wards.choose(rng) {
                            shaken.set(patient, current.with_ward(ward));
                        }
                    }
                }
            }
        }
        _ => {
            if count >= 2 {
                let pair = index::sample(rng, count, 2);
                let (first, second) = (pair.index(0), pair.index(1));
                let a = shaken.get(first);
                let b = shaken.get(second);
                if instance.is_compatible(first, b.ward)
                    && instance.is_compatible(second, a.ward)
                    && instance.admits(first, b.day)
                    && instance.admits(second, a.day)
                {
                    shaken.set(first, b);
                    shaken.set(second, a);
                }
            }
        }
    }
    shaken
}

/// Variable neighborhood search.
///
/// Every iteration shakes the best allocation in neighborhood `k`, runs
/// [`FastLocalSearch`] on the result, and keeps it if it is
/// capacity-feasible and improves the best objective. An improvement sends
/// `k` back to 1; anything else moves on to the next neighborhood.
///
/// Same seed precondition as ILS: the seed must be capacity-feasible.
#[derive(Debug, Clone)]
pub struct VariableNeighborhoodSearch {
    config: VariableNeighborhoodSearchConfig,
    weights: ObjectiveWeights,
}

impl VariableNeighborhoodSearch {
    pub fn new(config: VariableNeighborhoodSearchConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }
}

impl Search for VariableNeighborhoodSearch {
    fn name(&self) -> &'static str {
        "Variable Neighborhood Search"
    }

    fn search(
        &self,
        instance: &Instance,
        initial: Allocation,
        rng: &mut SolverRng,
    ) -> Result<SearchOutcome, SolveError> {
        let deadline = Deadline::new(self.config.time_limit());
        let mut director = ScoreDirector::new(instance, self.weights, initial)?;
        require_capacity_feasible(&director)?;

        let local_search = FastLocalSearch::new(self.config.local_search.clone());
        let mut stats = SearchStatistics::new();
        let mut best = director.clone_allocation();
        let mut best_score = director.score();
        stats.record_improvement(0, deadline.elapsed(), best_score);
        let mut neighborhood = NeighborhoodIndex::new(self.config.k_max);

        info!(
            event = "phase_start",
            phase = self.name(),
            objective = best_score,
            k_max = self.config.k_max,
        );

        for iteration in 1..=self.config.max_iterations {
            if deadline.is_reached() {
                debug!(event = "timeout", step = iteration);
                break;
            }
            stats.iterations = iteration;
            let k = neighborhood.current();

            director.reset(shake(instance, &best, k, &self.config.day_shifts, rng))?;
            let call = deadline.capped(local_search.config().time_limit());
            local_search.improve(&mut director, rng, call, &mut stats);

            let score = director.score();
            let improved =
                director.is_capacity_feasible() && score + IMPROVEMENT_EPSILON < best_score;
            if improved {
                best = director.clone_allocation();
                best_score = score;
                stats.record_improvement(iteration, deadline.elapsed(), score);
                debug!(event = "new_best", step = iteration, neighborhood = k, score = score);
            }
            let next = neighborhood.update(improved);
            trace!(event = "step", step = iteration, neighborhood = k, next = next);
        }

        let elapsed = deadline.elapsed();
        info!(
            event = "phase_end",
            phase = self.name(),
            duration_ms = elapsed.as_millis() as u64,
            steps = stats.iterations,
            objective = best_score,
        );
        Ok(SearchOutcome::evaluate(
            instance,
            &self.weights,
            best,
            elapsed,
            stats,
        )?)
    }
}
