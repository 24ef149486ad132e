//! Reassignment moves.
//!
//! A move describes a change to one or two patients' assignments. It is
//! applied through a [`Trial`], so rejecting it is a matter of dropping the
//! trial.

use rand::seq::IteratorRandom;
use rand::Rng;
use wardplan_core::{Allocation, Assignment, Instance};
use wardplan_scoring::Trial;

/// A change to the working allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Keep the ward, admit on another day.
    ChangeDay { patient: usize, day: usize },
    /// Keep the day, move to another ward.
    ChangeWard { patient: usize, ward: usize },
    /// Exchange the admission days of two patients, wards unchanged.
    SwapDays { first: usize, second: usize },
    /// Replace the whole assignment.
    Reassign { patient: usize, to: Assignment },
    /// Exchange the full (ward, day) pairs of two patients.
    SwapAssignments { first: usize, second: usize },
}

impl Move {
    /// Applies the move to the trial's working allocation.
    pub fn apply(&self, trial: &mut Trial<'_, '_>) {
        match *self {
            Move::ChangeDay { patient, day } => {
                let to = trial.assignment(patient).with_day(day);
                trial.assign(patient, to);
            }
            Move::ChangeWard { patient, ward } => {
                let to = trial.assignment(patient).with_ward(ward);
                trial.assign(patient, to);
            }
            Move::SwapDays { first, second } => {
                let a = trial.assignment(first);
                let b = trial.assignment(second);
                trial.assign(first, a.with_day(b.day));
                trial.assign(second, b.with_day(a.day));
            }
            Move::Reassign { patient, to } => {
                trial.assign(patient, to);
            }
            Move::SwapAssignments { first, second } => {
                let a = trial.assignment(first);
                let b = trial.assignment(second);
                trial.assign(first, b);
                trial.assign(second, a);
            }
        }
    }

    /// Returns true if applying the move to `allocation` changes nothing.
    pub fn is_noop(&self, allocation: &Allocation) -> bool {
        match *self {
            Move::ChangeDay { patient, day } => allocation.get(patient).day == day,
            Move::ChangeWard { patient, ward } => allocation.get(patient).ward == ward,
            Move::SwapDays { first, second } => {
                allocation.get(first).day == allocation.get(second).day
            }
            Move::Reassign { patient, to } => allocation.get(patient) == to,
            Move::SwapAssignments { first, second } => {
                allocation.get(first) == allocation.get(second)
            }
        }
    }
}

/// Draws one of three move types uniformly.
///
/// - a random patient's day, uniform over its window
/// - a random patient's ward, uniform over its other compatible wards
/// - the days of two random patients, swapped without window checks
///
/// The result may be a no-op (a single compatible ward, or the same patient
/// drawn twice). Returns `None` for an instance without patients.
pub fn random_move<R: Rng>(
    instance: &Instance,
    allocation: &Allocation,
    rng: &mut R,
) -> Option<Move> {
    let count = instance.patient_count();
    if count == 0 {
        return None;
    }
    let patient = rng.random_range(0..count);
    let mv = match rng.random_range(0..3) {
        0 => Move::ChangeDay {
            patient,
            day: rng.random_range(instance.admission_days(patient)),
        },
        1 => {
            let current = allocation.get(patient).ward;
            let ward = instance
                .compatible_wards(patient)
                .iter()
                .copied()
                .filter(|&w| w != current)
                .choose(rng)
                .unwrap_or(current);
            Move::ChangeWard { patient, ward }
        }
        _ => Move::SwapDays {
            first: patient,
            second: rng.random_range(0..count),
        },
    };
    Some(mv)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use wardplan_core::Allocation;
    use wardplan_scoring::{ObjectiveWeights, ScoreDirector};
    use wardplan_test::scenarios;

    use super::*;

    fn start() -> Allocation {
        Allocation::new(vec![
            Assignment::new(0, 0),
            Assignment::new(0, 1),
            Assignment::new(1, 0),
            Assignment::new(0, 1),
            Assignment::new(1, 2),
        ])
    }

    #[test]
    fn test_swap_days_keeps_wards() {
        let instance = scenarios::five_patients();
        let mut director = ScoreDirector::new(&instance, ObjectiveWeights::default(), start()).unwrap();

        let mut trial = director.trial();
        Move::SwapDays { first: 0, second: 4 }.apply(&mut trial);
        trial.commit();

        assert_eq!(director.assignment(0), Assignment::new(0, 2));
        assert_eq!(director.assignment(4), Assignment::new(1, 0));
    }

    #[test]
    fn test_swap_assignments_exchanges_pairs() {
        let instance = scenarios::five_patients();
        let mut director = ScoreDirector::new(&instance, ObjectiveWeights::default(), start()).unwrap();

        {
            let mut trial = director.trial();
            Move::SwapAssignments { first: 2, second: 3 }.apply(&mut trial);
            assert_eq!(trial.assignment(2), Assignment::new(0, 1));
            assert_eq!(trial.assignment(3), Assignment::new(1, 0));
        }

        assert_eq!(director.allocation(), &start());
    }

    #[test]
    fn test_is_noop() {
        let allocation = start();

        assert!(Move::ChangeDay { patient: 0, day: 0 }.is_noop(&allocation));
        assert!(!Move::ChangeWard { patient: 2, ward: 0 }.is_noop(&allocation));
        assert!(Move::SwapDays { first: 1, second: 3 }.is_noop(&allocation));
    }

    #[test]
    fn test_random_moves_stay_in_window_and_compatible() {
        let instance = scenarios::five_patients();
        let allocation = start();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..500 {
            match random_move(&instance, &allocation, &mut rng).unwrap() {
                Move::ChangeDay { patient, day } => assert!(instance.admits(patient, day)),
                Move::ChangeWard { patient, ward } => {
                    assert!(instance.is_compatible(patient, ward))
                }
                Move::SwapDays { first, second } => {
                    assert!(first < 5 && second < 5)
                }
                other => panic!("unexpected move {other:?}"),
            }
        }
    }
}
