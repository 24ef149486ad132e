//! Error types for the domain model

use thiserror::Error;

/// Errors raised while validating instance data or allocations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The planning horizon has no days.
    #[error("planning horizon must contain at least one day")]
    EmptyHorizon,

    /// A record references a specialization index that does not exist.
    #[error("{owner} references unknown specialization {index}")]
    UnknownSpecialization { owner: String, index: usize },

    /// A per-day vector does not cover the planning horizon.
    #[error("{owner}: `{field}` has {found} entries, expected {expected}")]
    HorizonLength {
        owner: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// The admission window is inverted.
    #[error("patient {patient}: earliest day {earliest} is after latest day {latest}")]
    InvalidWindow {
        patient: String,
        earliest: usize,
        latest: usize,
    },

    /// The admission window starts after the last day of the horizon.
    #[error("patient {patient}: earliest day {earliest} is outside the {horizon}-day horizon")]
    WindowOutsideHorizon {
        patient: String,
        earliest: usize,
        horizon: usize,
    },

    /// A patient must stay at least one day.
    #[error("patient {patient}: length of stay must be positive")]
    ZeroLengthOfStay { patient: String },

    /// The workload profile does not cover the whole stay.
    #[error("patient {patient}: workload profile has {profile} days, stay is {length_of_stay}")]
    ShortWorkloadProfile {
        patient: String,
        length_of_stay: usize,
        profile: usize,
    },

    /// Workload capacity is used as a divisor and must be positive.
    #[error("ward {ward}: workload capacity must be positive")]
    NonPositiveWorkloadCapacity { ward: String },

    /// No ward treats the patient's specialization.
    #[error("patient {patient}: no ward is compatible with its specialization")]
    NoCompatibleWard { patient: String },

    /// An allocation does not hold exactly one assignment per patient.
    #[error("allocation holds {found} assignments, instance has {expected} patients")]
    AllocationSize { expected: usize, found: usize },
}
