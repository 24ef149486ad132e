//! Simulated annealing over random reassignment moves.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, trace};
use wardplan_config::SimulatedAnnealingConfig;
use wardplan_core::{Allocation, Instance};
use wardplan_scoring::{ObjectiveWeights, ScoreDirector};

use super::{feasible_score, BestTracker, Search};
use crate::error::SolveError;
use crate::heuristic::random_move;
use crate::random::SolverRng;
use crate::statistics::{SearchOutcome, SearchStatistics};

/// Simulated annealing on the scalarized objective.
///
/// Each iteration draws a random day change, ward change or day swap and
/// accepts it if it lowers the objective, or otherwise with probability
/// `exp(-delta / T)`. The temperature is multiplied by the cooling rate after
/// every iteration and the run stops once it falls below the floor.
///
/// A candidate that breaks a window, capacity or compatibility constraint
/// scores as infinity and is always rejected, so a run started from a
/// feasible seed never leaves the feasible region. The best allocation is
/// tracked separately from the trajectory and a feasible one always outranks
/// an infeasible one.
///
/// # Example
///
/// ```
/// use wardplan_config::SimulatedAnnealingConfig;
/// use wardplan_scoring::ObjectiveWeights;
/// use wardplan_solver::SimulatedAnnealing;
///
/// let sa = SimulatedAnnealing::new(
///     SimulatedAnnealingConfig { max_iterations: 500, ..Default::default() },
///     ObjectiveWeights::default(),
/// );
/// assert_eq!(sa.temperature_after(0), 1000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing {
    config: SimulatedAnnealingConfig,
    weights: ObjectiveWeights,
}

impl SimulatedAnnealing {
    pub fn new(config: SimulatedAnnealingConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }

    /// Temperature after `iterations` cooling steps.
    pub fn temperature_after(&self, iterations: u32) -> f64 {
        self.config.initial_temperature * self.config.cooling_rate.powi(iterations as i32)
    }

    fn accepts(&self, delta: f64, temperature: f64, rng: &mut SolverRng) -> bool {
        if delta.is_nan() || delta == f64::INFINITY {
            return false;
        }
        if delta < 0.0 {
            return true;
        }
        temperature > 0.0 && rng.random::<f64>() < (-delta / temperature).exp()
    }
}

impl Search for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "Simulated Annealing"
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
        let mut current = director.score();
        let mut best = BestTracker::new(&director);
        if best.is_feasible() {
            stats.record_improvement(0, start.elapsed(), current);
        }
        let mut temperature = self.config.initial_temperature;

        info!(
            event = "phase_start",
            phase = self.name(),
            objective = current,
            temperature = temperature,
        );

        for iteration in 1..=self.config.max_iterations {
            stats.iterations = iteration;
            let Some(mv) = random_move(instance, director.allocation(), rng) else {
                break;
            };
            stats.moves_evaluated += 1;

            let mut trial = director.trial();
            mv.apply(&mut trial);
            let candidate = feasible_score(&trial);
            let delta = candidate - current;

            if self.accepts(delta, temperature, rng) {
                trial.commit();
                current = candidate;
                stats.moves_accepted += 1;
                trace!(event = "step", step = iteration, score = candidate, accepted = true);

                if best.offer(&director, current) {
                    if best.is_feasible() {
                        stats.record_improvement(iteration, start.elapsed(), current);
                    }
                    debug!(event = "new_best", step = iteration, score = current);
                }
            } else {
                drop(trial);
                trace!(event = "step", step = iteration, score = candidate, accepted = false);
            }

            temperature *= self.config.cooling_rate;
            if temperature < self.config.min_temperature {
                break;
            }
        }

        let elapsed = start.elapsed();
        info!(
            event = "phase_end",
            phase = self.name(),
            duration_ms = elapsed.as_millis() as u64,
            steps = stats.iterations,
            accepted = stats.moves_accepted,
            temperature = temperature,
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
