//! Domain model for admission planning
//!
//! The facts of a run are immutable once validated into an [`Instance`]:
//! - [`Patient`]: admission window, stay length, surgery time, workload profile
//! - [`Ward`]: bed and workload capacity, specializations, carryover occupancy
//! - [`Specialization`]: theatre budget and minor-ward workload discount
//! - [`CostWeights`]: per-unit costs of delay, overtime and undertime
//!
//! The only mutable state is the [`Allocation`].

mod allocation;
mod instance;
mod patient;
mod specialization;
mod ward;

pub use allocation::{Allocation, Assignment};
pub use instance::{CostWeights, Instance, InstanceData};
pub use patient::Patient;
pub use specialization::Specialization;
pub use ward::Ward;

#[cfg(test)]
mod tests;
