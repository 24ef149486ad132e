//! The mutable solution state.

use std::fmt;
use std::ops::Index;

use super::Instance;
use crate::error::ModelError;

/// A (ward, admission day) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub ward: usize,
    pub day: usize,
}

impl Assignment {
    pub fn new(ward: usize, day: usize) -> Self {
        Self { ward, day }
    }

    /// Same ward, different day.
    pub fn with_day(self, day: usize) -> Self {
        Self { day, ..self }
    }

    /// Same day, different ward.
    pub fn with_ward(self, ward: usize) -> Self {
        Self { ward, ..self }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ward {}, day {})", self.ward, self.day)
    }
}

/// Total mapping from patient index to [`Assignment`].
///
/// Every patient holds exactly one assignment at all times. Infeasibility
/// is a property of the assignment values, never of missing entries, so the
/// length is fixed at creation and no operation changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Allocation {
    assignments: Vec<Assignment>,
}

impl Allocation {
    /// Wraps one assignment per patient, in patient order.
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Wraps the assignments after checking they cover the instance.
    pub fn for_instance(
        instance: &Instance,
        assignments: Vec<Assignment>,
    ) -> Result<Self, ModelError> {
        let allocation = Self::new(assignments);
        allocation.check_size(instance)?;
        Ok(allocation)
    }

    /// Errors unless the allocation holds one assignment per patient.
    pub fn check_size(&self, instance: &Instance) -> Result<(), ModelError> {
        if self.assignments.len() == instance.patient_count() {
            Ok(())
        } else {
            Err(ModelError::AllocationSize {
                expected: instance.patient_count(),
                found: self.assignments.len(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn get(&self, patient: usize) -> Assignment {
        self.assignments[patient]
    }

    /// Replaces the patient's assignment, returning the previous one.
    pub fn set(&mut self, patient: usize, assignment: Assignment) -> Assignment {
        std::mem::replace(&mut self.assignments[patient], assignment)
    }

    /// Iterates `(patient, assignment)` pairs in patient order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Assignment)> + '_ {
        self.assignments.iter().copied().enumerate()
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_vec(self) -> Vec<Assignment> {
        self.assignments
    }
}

impl Index<usize> for Allocation {
    type Output = Assignment;

    fn index(&self, patient: usize) -> &Assignment {
        &self.assignments[patient]
    }
}
