//! Metaheuristic first, exact oracle second.

use std::time::{Duration, Instant};

use tracing::{info, warn};
use wardplan_config::SolverConfig;
use wardplan_core::{Allocation, Instance};
use wardplan_scoring::{Evaluator, ObjectiveWeights};

use super::oracle::{ExactOracle, OracleRequest, OracleSolution, OracleStatus, WarmStart};
use super::strategy::Metaheuristic;
use crate::error::SolveError;
use crate::phase::{Construction, LocalImprovement};
use crate::random::SolverRng;
use crate::statistics::SearchOutcome;

/// Result of a hybrid run.
#[derive(Debug, Clone)]
pub struct HybridReport {
    pub strategy: Metaheuristic,
    /// The metaheuristic's own result, time included.
    pub metaheuristic: SearchOutcome,
    /// A warm start was passed to the oracle.
    pub warm_start_applied: bool,
    /// `None` when the oracle call failed.
    pub oracle_status: Option<OracleStatus>,
    pub oracle_time: Duration,
    /// Scalarized objective of the oracle's answer.
    pub oracle_objective: Option<f64>,
    pub gap: Option<f64>,
    /// Oracle objective if there is one, metaheuristic objective otherwise.
    pub final_objective: f64,
    /// `(metaheuristic - final) / metaheuristic * 100`, when the oracle
    /// produced an objective and the metaheuristic objective is non-zero.
    pub improvement_pct: Option<f64>,
    pub total_time: Duration,
    /// The better feasible allocation of the two.
    pub best_allocation: Allocation,
}

/// Runs one metaheuristic, then refines its result with an exact oracle.
///
/// The strategy name from the `hybrid` section is resolved before any work
/// is done; an unknown name fails immediately. A feasible metaheuristic
/// result becomes the oracle's warm start. The oracle is called either way,
/// and any oracle error is logged and replaced by the metaheuristic result.
#[derive(Debug)]
pub struct HybridSolver<O> {
    config: SolverConfig,
    oracle: O,
}

impl<O: ExactOracle> HybridSolver<O> {
    pub fn new(config: SolverConfig, oracle: O) -> Self {
        Self { config, oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn into_oracle(self) -> O {
        self.oracle
    }

    /// Constructs a seed with the greedy heuristic and local improvement,
    /// then runs the configured strategy and the oracle.
    pub fn solve(
        &mut self,
        instance: &Instance,
        rng: &mut SolverRng,
    ) -> Result<HybridReport, SolveError> {
        let strategy: Metaheuristic = self.config.hybrid.metaheuristic.parse()?;
        let weights = self.config.objective.weights();
        let seed = Construction::new(self.config.construction.clone(), weights).construct(instance)?;
        let seed = LocalImprovement::new(self.config.local_improvement.clone(), weights)
            .improve(instance, seed)?
            .allocation;
        self.run(strategy, instance, seed, rng)
    }

    /// Runs the configured strategy from `seed`, then the oracle.
    pub fn solve_from(
        &mut self,
        instance: &Instance,
        seed: Allocation,
        rng: &mut SolverRng,
    ) -> Result<HybridReport, SolveError> {
        let strategy: Metaheuristic = self.config.hybrid.metaheuristic.parse()?;
        seed.check_size(instance)?;
        self.run(strategy, instance, seed, rng)
    }

    fn run(
        &mut self,
        strategy: Metaheuristic,
        instance: &Instance,
        seed: Allocation,
        rng: &mut SolverRng,
    ) -> Result<HybridReport, SolveError> {
        let start = Instant::now();
        let weights = self.config.objective.weights();
        info!(event = "phase_start", phase = "Hybrid", strategy = %strategy);

        let outcome = strategy.build(&self.config).search(instance, seed, rng)?;

        let warm_start = outcome
            .feasible
            .then(|| WarmStart::from_allocation(instance, &outcome.allocation));
        let request = OracleRequest {
            instance,
            weights,
            warm_start: warm_start.as_ref(),
            time_limit: self.config.hybrid.oracle_time_limit(),
            threads: self.config.hybrid.oracle_threads,
        };

        let oracle_start = Instant::now();
        let answer = self.oracle.solve(request);
        let oracle_time = oracle_start.elapsed();

        let mut report = HybridReport {
            strategy,
            warm_start_applied: warm_start.is_some(),
            oracle_status: None,
            oracle_time,
            oracle_objective: None,
            gap: None,
            final_objective: outcome.objective,
            improvement_pct: None,
            total_time: Duration::ZERO,
            best_allocation: outcome.allocation.clone(),
            metaheuristic: outcome,
        };

        match answer {
            Ok(solution) => apply_solution(&mut report, instance, &weights, solution),
            Err(err) => warn!(
                event = "oracle_failed",
                error = %err,
                fallback = "metaheuristic",
            ),
        }

        report.total_time = start.elapsed();
        info!(
            event = "phase_end",
            phase = "Hybrid",
            duration_ms = report.total_time.as_millis() as u64,
            metaheuristic_objective = report.metaheuristic.objective,
            final_objective = report.final_objective,
            warm_start = report.warm_start_applied,
        );
        Ok(report)
    }
}

fn apply_solution(
    report: &mut HybridReport,
    instance: &Instance,
    weights: &ObjectiveWeights,
    solution: OracleSolution,
) {
    report.oracle_status = Some(solution.status);
    report.gap = solution.gap;

    let evaluator = Evaluator::new(instance);
    let candidate = solution
        .allocation
        .and_then(|a| {
            let evaluation = evaluator.evaluate(&a).ok()?;
            Some((weights.scalarize(evaluation.objective), evaluation.is_feasible(), a))
        });

    let objective = candidate.as_ref().map(|(o, _, _)| *o).or(solution.objective);
    report.oracle_objective = objective;
    let Some(objective) = objective else {
        return;
    };

    let mh = report.metaheuristic.objective;
    report.final_objective = objective;
    if mh != 0.0 {
        report.improvement_pct = Some((mh - objective) / mh * 100.0);
    }

    if let Some((value, true, allocation)) = candidate {
        if !report.metaheuristic.feasible || value <= mh {
            report.best_allocation = allocation;
        }
    }
}
