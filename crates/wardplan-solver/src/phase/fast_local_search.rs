//! Sampled first-improvement descent on the capacity-soft objective.

use rand::seq::index;
use tracing::trace;
use wardplan_config::FastLocalSearchConfig;
use wardplan_scoring::ScoreDirector;

use super::IMPROVEMENT_EPSILON;
use crate::random::SolverRng;
use crate::statistics::SearchStatistics;
use crate::termination::Deadline;

/// Bounded day-shift descent used inside ILS and VNS.
///
/// Each round samples a subset of patients and, for each, a few random
/// window days. The first day change that lowers the penalized objective is
/// kept and the round ends there. A round without improvement ends the
/// call, as does the round cap or the deadline. Bed capacity may be
/// exceeded in between; the penalty steers back toward feasibility.
///
/// Sampling every patient and every day turns this into a plain
/// first-improvement descent.
#[derive(Debug, Clone)]
pub struct FastLocalSearch {
    config: FastLocalSearchConfig,
}

impl FastLocalSearch {
    pub fn new(config: FastLocalSearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FastLocalSearchConfig {
        &self.config
    }

    /// Patients sampled per round for an instance of `patient_count`.
    pub fn sample_size(&self, patient_count: usize) -> usize {
        let scaled = (patient_count as f64 * self.config.patient_fraction) as usize;
        scaled.max(self.config.min_patients).min(patient_count)
    }

    /// Improves the director's allocation in place and returns its
    /// penalized score.
    pub fn improve(
        &self,
        director: &mut ScoreDirector<'_>,
        rng: &mut SolverRng,
        deadline: Deadline,
        stats: &mut SearchStatistics,
    ) -> f64 {
        let instance = director.instance();
        let count = instance.patient_count();
        let sample = self.sample_size(count);
        let mut current = director.penalized_score();

        for _ in 0..self.config.rounds {
            if deadline.is_reached() {
                break;
            }
            let mut improved = false;

            'patients: for patient in index::sample(rng, count, sample) {
                if deadline.is_reached() {
                    break;
                }
                let base = director.assignment(patient);
                let window = instance.admission_days(patient);
                let first = *window.start();
                let width = window.count();
                let tries = self.config.days_per_patient.min(width);

                for offset in index::sample(rng, width, tries) {
                    let day = first + offset;
                    if day == base.day {
                        continue;
                    }
                    stats.moves_evaluated += 1;
                    let mut trial = director.trial();
                    trial.assign(patient, base.with_day(day));
                    let value = trial.penalized_score();
                    if value + IMPROVEMENT_EPSILON < current {
                        trial.commit();
                        current = value;
                        stats.moves_accepted += 1;
                        improved = true;
                        trace!(
                            event = "step",
                            patient = patient,
                            day = day,
                            score = value,
                            accepted = true,
                        );
                        break 'patients;
                    }
                }
            }

            if !improved {
                break;
            }
        }
        current
    }
}
