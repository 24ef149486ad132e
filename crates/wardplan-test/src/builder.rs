//! Terse constructors for domain records.
//!
//! Every per-day vector is sized to the given horizon. Carryover is zero and
//! each stay day carries one unit of workload unless overridden by the
//! caller after construction.

use wardplan_core::{Patient, Specialization, Ward};

/// A specialization with a flat daily theatre budget.
pub fn specialization(name: &str, horizon: usize, theatre: f64, factor: f64) -> Specialization {
    Specialization {
        name: name.to_string(),
        theatre_time: vec![theatre; horizon],
        workload_factor: factor,
    }
}

/// A ward with no minor specializations and no carryover.
pub fn ward(name: &str, major: usize, beds: u32, workload_capacity: f64, horizon: usize) -> Ward {
    Ward {
        name: name.to_string(),
        bed_capacity: beds,
        workload_capacity,
        major_specialization: major,
        minor_specializations: Vec::new(),
        carryover_patients: vec![0; horizon],
        carryover_workload: vec![0.0; horizon],
    }
}

/// A patient with unit workload on every stay day.
pub fn patient(
    name: &str,
    specialization: usize,
    window: (usize, usize),
    length_of_stay: usize,
    surgery_duration: f64,
) -> Patient {
    Patient {
        name: name.to_string(),
        specialization,
        earliest: window.0,
        latest: window.1,
        length_of_stay,
        surgery_duration,
        workload: vec![1.0; length_of_stay],
    }
}
