//! Incremental score director.
//!
//! The director owns the working allocation and its [`Ledger`]. Every
//! reassignment goes through [`ScoreDirector::assign`], which retracts the
//! old contribution and inserts the new one, so scores are always current.
//!
//! Tentative changes go through a [`Trial`], which rolls its moves back
//! when dropped unless [`Trial::commit`] is called.

mod recording;

#[cfg(test)]
mod tests;

pub use recording::Trial;

use wardplan_core::{Allocation, Assignment, Instance, ModelError};

use crate::ledger::Ledger;
use crate::objective::{Objective, ObjectiveWeights};

/// Working allocation plus its incrementally maintained tallies.
#[derive(Debug, Clone)]
pub struct ScoreDirector<'a> {
    weights: ObjectiveWeights,
    allocation: Allocation,
    ledger: Ledger<'a>,
}

impl<'a> ScoreDirector<'a> {
    /// Takes ownership of `allocation` and tallies it.
    pub fn new(
        instance: &'a Instance,
        weights: ObjectiveWeights,
        allocation: Allocation,
    ) -> Result<Self, ModelError> {
        let ledger = Ledger::from_allocation(instance, &allocation)?;
        Ok(Self {
            weights,
            allocation,
            ledger,
        })
    }

    pub fn instance(&self) -> &'a Instance {
        self.ledger.instance()
    }

    pub fn weights(&self) -> &ObjectiveWeights {
        &self.weights
    }

    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Independent snapshot of the working allocation.
    pub fn clone_allocation(&self) -> Allocation {
        self.allocation.clone()
    }

    pub fn into_allocation(self) -> Allocation {
        self.allocation
    }

    pub fn ledger(&self) -> &Ledger<'a> {
        &self.ledger
    }

    /// Current assignment of one patient.
    pub fn assignment(&self, patient: usize) -> Assignment {
        self.allocation.get(patient)
    }

    /// Moves the patient, returning the previous assignment.
    pub fn assign(&mut self, patient: usize, assignment: Assignment) -> Assignment {
        let old = self.allocation.get(patient);
        if old != assignment {
            self.ledger.retract(patient, old);
            self.allocation.set(patient, assignment);
            self.ledger.insert(patient, assignment);
        }
        old
    }

    /// Replaces the working allocation.
    pub fn reset(&mut self, allocation: Allocation) -> Result<(), ModelError> {
        self.ledger = Ledger::from_allocation(self.instance(), &allocation)?;
        self.allocation = allocation;
        Ok(())
    }

    /// Opens a scope whose moves are undone unless committed.
    pub fn trial(&mut self) -> Trial<'_, 'a> {
        Trial::new(self)
    }

    pub fn objective(&self) -> Objective {
        self.ledger.objective()
    }

    /// Scalarized objective of the working allocation.
    pub fn score(&self) -> f64 {
        self.weights.scalarize(self.objective())
    }

    /// Scalarized objective plus the capacity penalty.
    pub fn penalized_score(&self) -> f64 {
        self.weights
            .penalize(self.objective(), self.ledger.bed_violations())
    }

    pub fn bed_violations(&self) -> u64 {
        self.ledger.bed_violations()
    }

    pub fn is_capacity_feasible(&self) -> bool {
        self.ledger.is_capacity_feasible()
    }

    pub fn is_feasible(&self) -> bool {
        self.ledger.is_feasible()
    }

    /// Returns true if moving the patient to `to` keeps its new stay within
    /// bed capacity.
    pub fn fits(&self, patient: usize, to: Assignment) -> bool {
        self.ledger
            .fits(patient, to, Some(self.allocation.get(patient)))
    }
}
