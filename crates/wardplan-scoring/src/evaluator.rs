//! Stateless full evaluation of an allocation.

use wardplan_core::{Allocation, Instance, ModelError};

use crate::ledger::Ledger;
use crate::objective::{Objective, ObjectiveWeights};

/// Full breakdown of one allocation's objective and feasibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub objective: Objective,
    /// Unweighted days of admission delay.
    pub delay_days: u64,
    pub overtime: f64,
    pub undertime: f64,
    /// Ward-day attaining the balance objective.
    pub busiest: Option<(usize, usize)>,
    pub bed_violations: u64,
    pub window_violations: usize,
    pub compatibility_violations: usize,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.bed_violations == 0 && self.window_violations == 0 && self.compatibility_violations == 0
    }

    pub fn is_capacity_feasible(&self) -> bool {
        self.bed_violations == 0
    }
}

/// Evaluates allocations of one instance from scratch.
///
/// Holds no mutable state: two calls on the same allocation always agree.
/// The strict and penalized objectives are read off the same [`Ledger`].
///
/// Every method fails with [`ModelError::AllocationSize`] if the allocation
/// does not hold one assignment per patient.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
}

impl<'a> Evaluator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Builds the tallies for `allocation`.
    pub fn ledger(&self, allocation: &Allocation) -> Result<Ledger<'a>, ModelError> {
        Ledger::from_allocation(self.instance, allocation)
    }

    /// Window, capacity and compatibility all hold.
    pub fn is_feasible(&self, allocation: &Allocation) -> Result<bool, ModelError> {
        Ok(self.ledger(allocation)?.is_feasible())
    }

    /// Sum over ward-days of occupancy beyond capacity.
    pub fn bed_violations(&self, allocation: &Allocation) -> Result<u64, ModelError> {
        Ok(self.ledger(allocation)?.bed_violations())
    }

    pub fn objective(&self, allocation: &Allocation) -> Result<Objective, ModelError> {
        Ok(self.ledger(allocation)?.objective())
    }

    /// `lambda_cost * cost + lambda_balance * balance`.
    pub fn scalarized(
        &self,
        allocation: &Allocation,
        weights: &ObjectiveWeights,
    ) -> Result<f64, ModelError> {
        Ok(weights.scalarize(self.objective(allocation)?))
    }

    /// Scalarized objective plus the capacity penalty per excess bed.
    pub fn penalized_objective(
        &self,
        allocation: &Allocation,
        weights: &ObjectiveWeights,
    ) -> Result<f64, ModelError> {
        let ledger = self.ledger(allocation)?;
        Ok(weights.penalize(ledger.objective(), ledger.bed_violations()))
    }

    pub fn evaluate(&self, allocation: &Allocation) -> Result<Evaluation, ModelError> {
        let ledger = self.ledger(allocation)?;
        let (overtime, undertime) = ledger.theatre_deviation();
        Ok(Evaluation {
            objective: ledger.objective(),
            delay_days: ledger.delay_days(),
            overtime,
            undertime,
            busiest: ledger.busiest().map(|(ward, day, _)| (ward, day)),
            bed_violations: ledger.bed_violations(),
            window_violations: ledger.window_violations(),
            compatibility_violations: ledger.compatibility_violations(),
        })
    }
}
