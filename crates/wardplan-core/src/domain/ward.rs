//! Hospital wards.

/// A hospital ward.
///
/// `carryover_patients` and `carryover_workload` hold the occupancy left by
/// patients admitted before the horizon, one entry per day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ward {
    pub name: String,
    pub bed_capacity: u32,
    /// Divisor used to normalize the daily workload.
    pub workload_capacity: f64,
    pub major_specialization: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub minor_specializations: Vec<usize>,
    pub carryover_patients: Vec<u32>,
    pub carryover_workload: Vec<f64>,
}

impl Ward {
    /// Returns true if patients of `specialization` may be placed here.
    pub fn accepts(&self, specialization: usize) -> bool {
        self.major_specialization == specialization || self.is_minor(specialization)
    }

    /// Returns true if `specialization` is treated here as a minor one.
    ///
    /// The major specialization is never minor, even if listed twice.
    pub fn is_minor(&self, specialization: usize) -> bool {
        self.major_specialization != specialization
            && self.minor_specializations.contains(&specialization)
    }
}
