//! Deterministic first-fit construction with congestion repair.

use std::time::Instant;

use tracing::{debug, info};
use wardplan_config::ConstructionConfig;
use wardplan_core::{Allocation, Assignment, Instance};
use wardplan_scoring::{Ledger, ObjectiveWeights};

use crate::error::SolveError;

/// Builds an initial capacity-feasible allocation.
///
/// Patients are placed tightest window first, then earliest due, then
/// longest stay. Each takes the first compatible ward and earliest window
/// day whose whole stay fits under bed capacity. When nothing fits, a few
/// already-placed patients occupying the congested ward-day are shifted one
/// day forward inside their own windows. If that frees no bed, every
/// capacity-feasible (ward, day) pair is scored by the scalarized objective
/// and the cheapest is taken. A patient with no such pair makes the
/// instance saturated.
///
/// No randomness is involved: the same instance always yields the same
/// allocation.
#[derive(Debug, Clone)]
pub struct Construction {
    config: ConstructionConfig,
    weights: ObjectiveWeights,
}

impl Construction {
    pub fn new(config: ConstructionConfig, weights: ObjectiveWeights) -> Self {
        Self { config, weights }
    }

    /// Placement order: window width ascending, earliest day ascending,
    /// length of stay descending, then patient index.
    pub fn placement_order(instance: &Instance) -> Vec<usize> {
        let mut order: Vec<usize> = (0..instance.patient_count()).collect();
        order.sort_by_key(|&p| {
            let patient = instance.patient(p);
            (
                patient.window_width(),
                patient.earliest,
                std::cmp::Reverse(patient.length_of_stay),
                p,
            )
        });
        order
    }

    /// Places every patient or fails with [`SolveError::Saturated`].
    pub fn construct(&self, instance: &Instance) -> Result<Allocation, SolveError> {
        let start = Instant::now();
        info!(
            event = "phase_start",
            phase = "Construction",
            patients = instance.patient_count(),
        );

        let mut ledger = Ledger::empty(instance);
        let mut placed: Vec<Option<Assignment>> = vec![None; instance.patient_count()];
        let mut repaired = 0usize;
        let mut fallbacks = 0usize;

        for patient in Self::placement_order(instance) {
            let assignment = match first_fit(&ledger, patient) {
                Some(a) => a,
                None => match self.repair(&mut ledger, &mut placed, patient) {
                    Some(a) => {
                        repaired += 1;
                        a
                    }
                    None => match self.cheapest_fit(&mut ledger, patient) {
                        Some(a) => {
                            fallbacks += 1;
                            a
                        }
                        None => {
                            let name = instance.patient(patient).name.clone();
                            info!(
                                event = "phase_end",
                                phase = "Construction",
                                duration_ms = start.elapsed().as_millis() as u64,
                                saturated = %name,
                            );
                            return Err(SolveError::Saturated { patient: name });
                        }
                    },
                },
            };
            ledger.insert(patient, assignment);
            placed[patient] = Some(assignment);
        }

        let assignments: Vec<Assignment> = placed.into_iter().flatten().collect();
        let allocation = Allocation::for_instance(instance, assignments)?;
        let score = self.weights.scalarize(ledger.objective());
        info!(
            event = "phase_end",
            phase = "Construction",
            duration_ms = start.elapsed().as_millis() as u64,
            repaired = repaired,
            fallbacks = fallbacks,
            objective = score,
        );
        Ok(allocation)
    }

    // Shifts placed patients off congested ward-days until the patient fits.
    fn repair(
        &self,
        ledger: &mut Ledger<'_>,
        placed: &mut [Option<Assignment>],
        patient: usize,
    ) -> Option<Assignment> {
        let instance = ledger.instance();
        let horizon = instance.horizon();
        let capacity_of = |ward: usize| instance.ward(ward).bed_capacity;
        let length_of_stay = instance.patient(patient).length_of_stay;
        let mut shifts = 0;

        'scan: for &ward in instance.compatible_wards(patient) {
            for day in instance.admission_days(patient) {
                let end = (day + length_of_stay).min(horizon);
                for congested in day..end {
                    if shifts >= self.config.repair_shift_limit {
                        break 'scan;
                    }
                    if ledger.beds(ward, congested) < capacity_of(ward) {
                        continue;
                    }
                    let candidates = placed
                        .iter()
                        .enumerate()
                        .filter_map(|(q, a)| a.map(|a| (q, a)))
                        .filter(|&(q, a)| {
                            a.ward == ward && instance.patient(q).occupies(a.day, congested)
                        })
                        .take(self.config.repair_candidates);

                    let mut shifted = None;
                    for (q, old) in candidates {
                        let new = old.with_day(old.day + 1);
                        if instance.admits(q, new.day) && ledger.fits(q, new, Some(old)) {
                            shifted = Some((q, old, new));
                            break;
                        }
                    }
                    if let Some((q, old, new)) = shifted {
                        ledger.retract(q, old);
                        ledger.insert(q, new);
                        placed[q] = Some(new);
                        shifts += 1;
                        debug!(
                            event = "repair_shift",
                            patient = q,
                            ward = ward,
                            from_day = old.day,
                            to_day = new.day,
                        );
                        let target = Assignment::new(ward, day);
                        if ledger.fits(patient, target, None) {
                            return Some(target);
                        }
                    }
                }
            }
        }
        if shifts > 0 {
            first_fit(ledger, patient)
        } else {
            None
        }
    }

    // Scores every capacity-feasible placement and keeps the cheapest.
    // Only runs after first_fit has failed on this same ledger, over the
    // same cells with the same fits filter, so it finds nothing and the
    // patient is reported as saturated.
    fn cheapest_fit(&self, ledger: &mut Ledger<'_>, patient: usize) -> Option<Assignment> {
        let instance = ledger.instance();
        let mut best: Option<(f64, Assignment)> = None;
        for &ward in instance.compatible_wards(patient) {
            for day in instance.admission_days(patient) {
                let candidate = Assignment::new(ward, day);
                if !ledger.fits(patient, candidate, None) {
                    continue;
                }
                ledger.insert(patient, candidate);
                let score = self.weights.scalarize(ledger.objective());
                ledger.retract(patient, candidate);
                match best {
                    Some((s, _)) if s <= score => {}
                    _ => best = Some((score, candidate)),
                }
            }
        }
        best.map(|(_, a)| a)
    }
}

fn first_fit(ledger: &Ledger<'_>, patient: usize) -> Option<Assignment> {
    let instance = ledger.instance();
    instance
        .compatible_wards(patient)
        .iter()
        .flat_map(|&ward| {
            instance
                .admission_days(patient)
                .map(move |day| Assignment::new(ward, day))
        })
        .find(|&a| ledger.fits(patient, a, None))
}
