//! Iterated local search with mixed random and worst-delay perturbation.

use rand::seq::{index, IndexedRandom};
use rand::Rng;
use tracing::{debug, info};
use wardplan_config::IteratedLocalSearchConfig;
use wardplan_core::{Allocation, Assignment, Instance};
use wardplan_scoring::{ObjectiveWeights, ScoreDirector};

use super::fast_local_search::FastLocalSearch;
use super::{require_capacity_feasible, Search, IMPROVEMENT_EPSILON};
use crate::error::SolveError;
use crate::random::SolverRng;
use crate::statistics::{SearchOutcome, SearchStatistics};
use crate::termination::Deadline;

/// Reassigns a share of patients to a random compatible ward and window day.
///
/// `max(1, intensity * n)` patients are drawn: half of them (rounded up) at
/// random, the rest the largest delay contributors of `allocation`. The
/// result may exceed bed capacity.
pub fn perturb(
    instance: &Instance,
    allocation: &Allocation,
    intensity: f64,
    rng: &mut SolverRng,
) -> Allocation {
    let count = instance.patient_count();
    let mut perturbed = allocation.clone();
    if count == 0 {
        return perturbed;
    }
    let total = ((count as f64 * intensity) as usize).clamp(1, count);
    let worst = total / 2;
    let random = total - worst;

    let mut by_delay: Vec<usize> = (0..count).collect();
    by_delay.sort_by_key(|&p| std::cmp::Reverse(instance.patient(p).delay(allocation.get(p).day)));

    let chosen: Vec<usize> = index::sample(rng, count, random)
        .into_iter()
        .chain(by_delay.into_iter().take(worst))
        .collect();

    for patient in chosen {
        let Some(&ward) = instance.compatible_wards(patient).choose(rng) else {
            continue;
        };
        let day = rng.random_range(instance.admission_days(patient));
        perturbed.set(patient, Assignment::new(ward, day));
    }
    perturbed
}

/// Iterated local search with stagnation-triggered perturbation.
///
/// Runs [`FastLocalSearch`] on the current allocation every iteration. A
/// capacity-feasible result that beats the best feasible objective becomes
/// the new best. After `stagnation_limit` iterations without improvement,
/// the best allocation is perturbed and the search continues from there.
/// The perturbed share starts at `perturbation_base` and grows by that much
/// with every perturbation since the last improvement, up to
/// `perturbation_max`.
///
/// The seed must be capacity-feasible. Only capacity-feasible allocations
/// are ever published.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch {
    config: IteratedLocalSearchConfig,
    weights: ObjectiveWeights,
}

impl IteratedLocalSearch {
    pub fn new(config: IteratedLocalSearchConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }

    /// Share of patients perturbed after `escalations` earlier perturbations
    /// without improvement.
    pub fn intensity(&self, escalations: u32) -> f64 {
        (self.config.perturbation_base * f64::from(1 + escalations)).min(self.config.perturbation_max)
    }
}

impl Search for IteratedLocalSearch {
    fn name(&self) -> &'static str {
        "Iterated Local Search"
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
        let mut stagnation = 0u32;
        let mut escalations = 0u32;

        info!(
            event = "phase_start",
            phase = self.name(),
            objective = best_score,
            time_limit_s = self.config.seconds_spent_limit,
        );

        for iteration in 1..=self.config.max_iterations {
            if deadline.is_reached() {
                debug!(event = "timeout", step = iteration);
                break;
            }
            stats.iterations = iteration;

            let call = deadline.capped(local_search.config().time_limit());
            local_search.improve(&mut director, rng, call, &mut stats);

            let score = director.score();
            if director.is_capacity_feasible() && score + IMPROVEMENT_EPSILON < best_score {
                best = director.clone_allocation();
                best_score = score;
                stagnation = 0;
                escalations = 0;
                stats.record_improvement(iteration, deadline.elapsed(), score);
                debug!(event = "new_best", step = iteration, score = score);
            } else {
                stagnation += 1;
            }

            if stagnation >= self.config.stagnation_limit {
                let intensity = self.intensity(escalations);
                debug!(event = "perturb", step = iteration, intensity = intensity);
                director.reset(perturb(instance, &best, intensity, rng))?;
                escalations += 1;
                stagnation = 0;
            }
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
