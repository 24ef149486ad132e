//! Running tallies behind every evaluation.
//!
//! A [`Ledger`] holds bed counts and workload per ward-day, theatre usage per
//! specialization-day, total delay, and violation counts. Patients are added
//! with [`Ledger::insert`] and removed with [`Ledger::retract`]; both touch
//! only the cells of that patient's stay, so a move costs O(length of stay).
//! Cost and balance are read off the tallies on demand.

use wardplan_core::{Allocation, Assignment, Instance, ModelError};

use crate::objective::Objective;

/// Per-cell tallies for one allocation of one instance.
#[derive(Debug, Clone)]
pub struct Ledger<'a> {
    instance: &'a Instance,
    // ward-major: ward * horizon + day
    beds: Vec<u32>,
    workload: Vec<f64>,
    // specialization-major: spec * horizon + day
    theatre: Vec<f64>,
    bed_excess: u64,
    delay_days: u64,
    window_violations: usize,
    compatibility_violations: usize,
}

impl<'a> Ledger<'a> {
    /// A ledger holding only carryover occupancy and workload.
    pub fn empty(instance: &'a Instance) -> Self {
        let horizon = instance.horizon();
        let mut beds = Vec::with_capacity(instance.ward_count() * horizon);
        let mut workload = Vec::with_capacity(instance.ward_count() * horizon);
        let mut bed_excess = 0;
        for ward in instance.wards() {
            for day in 0..horizon {
                let carried = ward.carryover_patients[day];
                bed_excess += u64::from(carried.saturating_sub(ward.bed_capacity));
                beds.push(carried);
                workload.push(ward.carryover_workload[day]);
            }
        }

        Self {
            instance,
            beds,
            workload,
            theatre: vec![0.0; instance.specialization_count() * horizon],
            bed_excess,
            delay_days: 0,
            window_violations: 0,
            compatibility_violations: 0,
        }
    }

    /// Tallies every assignment of `allocation`.
    ///
    /// Fails with [`ModelError::AllocationSize`] unless the allocation holds
    /// one assignment per patient.
    pub fn from_allocation(
        instance: &'a Instance,
        allocation: &Allocation,
    ) -> Result<Self, ModelError> {
        allocation.check_size(instance)?;
        let mut ledger = Self::empty(instance);
        for (patient, assignment) in allocation.iter() {
            ledger.insert(patient, assignment);
        }
        Ok(ledger)
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Adds the patient's contribution at `assignment`.
    pub fn insert(&mut self, patient: usize, assignment: Assignment) {
        self.apply(patient, assignment, true);
    }

    /// Removes a contribution previously added with [`insert`](Self::insert).
    pub fn retract(&mut self, patient: usize, assignment: Assignment) {
        self.apply(patient, assignment, false);
    }

    fn apply(&mut self, patient: usize, assignment: Assignment, add: bool) {
        let instance = self.instance;
        let horizon = instance.horizon();
        let p = instance.patient(patient);
        let Assignment { ward, day } = assignment;

        let step = |count: &mut usize| {
            if add {
                *count += 1;
            } else {
                *count -= 1;
            }
        };
        if !instance.admits(patient, day) {
            step(&mut self.window_violations);
        }
        if !instance.is_compatible(patient, ward) {
            step(&mut self.compatibility_violations);
        }

        let delay = p.delay(day) as u64;
        let surgery = p.surgery_duration;
        if add {
            self.delay_days += delay;
        } else {
            self.delay_days -= delay;
        }
        if day < horizon {
            let cell = &mut self.theatre[p.specialization * horizon + day];
            if add {
                *cell += surgery;
            } else {
                *cell -= surgery;
            }
        }

        if ward >= instance.ward_count() {
            return;
        }
        let capacity = instance.ward(ward).bed_capacity;
        let factor = instance.workload_factor(patient, ward);
        let end = (day + p.length_of_stay).min(horizon);
        for stay_day in day..end {
            let index = ward * horizon + stay_day;
            let load = p.workload_on(stay_day - day) * factor;
            if add {
                if self.beds[index] >= capacity {
                    self.bed_excess += 1;
                }
                self.beds[index] += 1;
                self.workload[index] += load;
            } else {
                debug_assert!(self.beds[index] > 0, "retracting an absent patient");
                self.beds[index] -= 1;
                if self.beds[index] >= capacity {
                    self.bed_excess -= 1;
                }
                self.workload[index] -= load;
            }
        }
    }

    /// Occupied beds, carryover included.
    pub fn beds(&self, ward: usize, day: usize) -> u32 {
        self.beds[ward * self.instance.horizon() + day]
    }

    /// Normalized workload of one ward-day.
    pub fn load(&self, ward: usize, day: usize) -> f64 {
        self.workload[ward * self.instance.horizon() + day] / self.instance.ward(ward).workload_capacity
    }

    /// Sum over ward-days of occupancy beyond bed capacity.
    pub fn bed_violations(&self) -> u64 {
        self.bed_excess
    }

    /// Patients admitted outside their window.
    pub fn window_violations(&self) -> usize {
        self.window_violations
    }

    /// Patients placed in a ward that cannot treat them.
    pub fn compatibility_violations(&self) -> usize {
        self.compatibility_violations
    }

    pub fn is_capacity_feasible(&self) -> bool {
        self.bed_excess == 0
    }

    /// Window, compatibility and capacity all hold.
    pub fn is_feasible(&self) -> bool {
        self.window_violations == 0 && self.compatibility_violations == 0 && self.bed_excess == 0
    }

    /// Returns true if moving the patient to `to` keeps every day of the new
    /// stay within bed capacity.
    ///
    /// `from` is the patient's current assignment, if any; its beds are
    /// treated as already vacated.
    pub fn fits(&self, patient: usize, to: Assignment, from: Option<Assignment>) -> bool {
        let instance = self.instance;
        if to.ward >= instance.ward_count() {
            return false;
        }
        let p = instance.patient(patient);
        let capacity = instance.ward(to.ward).bed_capacity;
        let end = (to.day + p.length_of_stay).min(instance.horizon());
        (to.day..end).all(|day| {
            let mut used = self.beds(to.ward, day);
            if let Some(from) = from {
                if from.ward == to.ward && p.occupies(from.day, day) {
                    used -= 1;
                }
            }
            used < capacity
        })
    }

    /// Total days of admission delay, unweighted.
    pub fn delay_days(&self) -> u64 {
        self.delay_days
    }

    /// Theatre overtime and undertime summed over every specialization-day.
    pub fn theatre_deviation(&self) -> (f64, f64) {
        let horizon = self.instance.horizon();
        let mut overtime = 0.0;
        let mut undertime = 0.0;
        for (s, spec) in self.instance.specializations().iter().enumerate() {
            for day in 0..horizon {
                let used = self.theatre[s * horizon + day];
                let budget = spec.theatre_time[day];
                if used > budget {
                    overtime += used - budget;
                } else {
                    undertime += budget - used;
                }
            }
        }
        (overtime, undertime)
    }

    /// Weighted delay, overtime and undertime.
    pub fn cost(&self) -> f64 {
        let weights = self.instance.weights();
        let (overtime, undertime) = self.theatre_deviation();
        weights.delay * self.delay_days as f64
            + weights.overtime * overtime
            + weights.undertime * undertime
    }

    /// The ward-day with the highest normalized workload and that value.
    ///
    /// Ties go to the first ward, then the first day.
    pub fn busiest(&self) -> Option<(usize, usize, f64)> {
        let horizon = self.instance.horizon();
        let mut best: Option<(usize, usize, f64)> = None;
        for ward in 0..self.instance.ward_count() {
            for day in 0..horizon {
                let load = self.load(ward, day);
                match best {
                    Some((_, _, max)) if load <= max => {}
                    _ => best = Some((ward, day, load)),
                }
            }
        }
        best
    }

    /// Worst normalized workload, zero for an instance without wards.
    pub fn balance(&self) -> f64 {
        self.busiest().map_or(0.0, |(_, _, load)| load)
    }

    pub fn objective(&self) -> Objective {
        Objective::new(self.cost(), self.balance())
    }
}
