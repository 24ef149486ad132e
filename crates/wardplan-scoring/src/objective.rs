//! Two-objective values and their scalarization.

use std::fmt;

/// Raw objective pair of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Objective {
    /// Weighted delay plus theatre overtime and undertime.
    pub cost: f64,
    /// Worst normalized workload over all ward-days.
    pub balance: f64,
}

impl Objective {
    pub fn new(cost: f64, balance: f64) -> Self {
        Self { cost, balance }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cost={:.3} balance={:.3}", self.cost, self.balance)
    }
}

/// Scalarization weights plus the penalty on bed-capacity excess.
///
/// Passed explicitly to every component; there is no global default beyond
/// [`Default`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveWeights {
    pub lambda_cost: f64,
    pub lambda_balance: f64,
    pub capacity_penalty: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            lambda_cost: 0.5,
            lambda_balance: 0.5,
            capacity_penalty: 1000.0,
        }
    }
}

impl ObjectiveWeights {
    pub fn new(lambda_cost: f64, lambda_balance: f64, capacity_penalty: f64) -> Self {
        Self {
            lambda_cost,
            lambda_balance,
            capacity_penalty,
        }
    }

    /// `lambda_cost * cost + lambda_balance * balance`.
    pub fn scalarize(&self, objective: Objective) -> f64 {
        scalarize(
            objective.cost,
            objective.balance,
            self.lambda_cost,
            self.lambda_balance,
        )
    }

    /// Scalarized value plus `capacity_penalty` per excess bed.
    pub fn penalize(&self, objective: Objective, bed_violations: u64) -> f64 {
        self.scalarize(objective) + self.capacity_penalty * bed_violations as f64
    }
}

/// Weighted sum of the two objectives.
pub fn scalarize(cost: f64, balance: f64, lambda_cost: f64, lambda_balance: f64) -> f64 {
    lambda_cost * cost + lambda_balance * balance
}
