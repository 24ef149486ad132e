//! Wardplan Core - domain model for patient admission planning
//!
//! This crate provides the immutable facts of a planning run and the mutable
//! solution state shared by every search strategy:
//! - [`Patient`], [`Ward`], [`Specialization`] and [`CostWeights`]
//! - [`Instance`], the validated, read-only bundle of the above
//! - [`Allocation`], a total mapping from patient to (ward, day)

pub mod domain;
pub mod error;

pub use domain::{
    Allocation, Assignment, CostWeights, Instance, InstanceData, Patient, Specialization, Ward,
};
pub use error::ModelError;
