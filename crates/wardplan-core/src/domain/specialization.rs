//! Medical specializations.

/// A medical specialization with its own operating-theatre budget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specialization {
    pub name: String,
    /// Theatre time available on each day of the horizon.
    pub theatre_time: Vec<f64>,
    /// Multiplier applied to a patient's workload when treated in a ward
    /// where this specialization is only a minor one.
    pub workload_factor: f64,
}
