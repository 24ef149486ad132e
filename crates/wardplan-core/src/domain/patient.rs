//! Patient records.

/// A patient awaiting admission.
///
/// Days are zero-based indices into the planning horizon. The admission
/// window `[earliest, latest]` is inclusive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    /// External identifier, used in logs and errors.
    pub name: String,
    /// Index of the patient's specialization.
    pub specialization: usize,
    /// First admissible day.
    pub earliest: usize,
    /// Last admissible day.
    pub latest: usize,
    /// Number of days the patient occupies a bed.
    pub length_of_stay: usize,
    /// Operating-theatre time consumed on the admission day.
    pub surgery_duration: f64,
    /// Workload units per day since admission.
    pub workload: Vec<f64>,
}

impl Patient {
    /// Number of admissible days minus one; zero for a fixed-date patient.
    pub fn window_width(&self) -> usize {
        self.latest.saturating_sub(self.earliest)
    }

    /// Admission delay if admitted on `day`.
    pub fn delay(&self, day: usize) -> usize {
        day.saturating_sub(self.earliest)
    }

    /// Returns true if `day` lies inside the admission window.
    pub fn admits(&self, day: usize) -> bool {
        self.earliest <= day && day <= self.latest
    }

    /// Returns true if a patient admitted on `admission` is in a bed on `day`.
    pub fn occupies(&self, admission: usize, day: usize) -> bool {
        admission <= day && day < admission + self.length_of_stay
    }

    /// Workload on the given day of stay, zero past the profile.
    pub fn workload_on(&self, day_of_stay: usize) -> f64 {
        self.workload.get(day_of_stay).copied().unwrap_or(0.0)
    }
}
