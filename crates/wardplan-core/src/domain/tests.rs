//! Tests for the domain model.

use super::*;
use crate::error::ModelError;

fn spec(name: &str, horizon: usize) -> Specialization {
    Specialization {
        name: name.to_string(),
        theatre_time: vec![4.0; horizon],
        workload_factor: 0.5,
    }
}

fn ward(name: &str, major: usize, minors: Vec<usize>, horizon: usize) -> Ward {
    Ward {
        name: name.to_string(),
        bed_capacity: 2,
        workload_capacity: 10.0,
        major_specialization: major,
        minor_specializations: minors,
        carryover_patients: vec![0; horizon],
        carryover_workload: vec![0.0; horizon],
    }
}

fn patient(name: &str, spec: usize, earliest: usize, latest: usize, los: usize) -> Patient {
    Patient {
        name: name.to_string(),
        specialization: spec,
        earliest,
        latest,
        length_of_stay: los,
        surgery_duration: 1.0,
        workload: vec![1.0; los],
    }
}

fn data() -> InstanceData {
    InstanceData {
        horizon: 5,
        weights: CostWeights::default(),
        specializations: vec![spec("cardio", 5), spec("ortho", 5)],
        wards: vec![ward("A", 0, vec![1], 5), ward("B", 1, vec![], 5)],
        patients: vec![patient("p0", 0, 0, 2, 2), patient("p1", 1, 3, 9, 1)],
    }
}

#[test]
fn test_compatible_wards_include_minor() {
    let instance = Instance::try_from(data()).unwrap();

    assert_eq!(instance.compatible_wards(0), &[0]);
    assert_eq!(instance.compatible_wards(1), &[0, 1]);
    assert!(instance.is_compatible(1, 0));
    assert!(!instance.is_compatible(0, 1));
    assert!(!instance.is_compatible(0, 7));
}

#[test]
fn test_workload_factor_applies_only_to_minor() {
    let instance = Instance::try_from(data()).unwrap();

    assert_eq!(instance.workload_factor(0, 0), 1.0);
    assert_eq!(instance.workload_factor(1, 0), 0.5);
    assert_eq!(instance.workload_factor(1, 1), 1.0);
}

#[test]
fn test_major_listed_as_minor_is_not_discounted() {
    let mut d = data();
    d.wards[1].minor_specializations = vec![1];
    let instance = Instance::try_from(d).unwrap();

    assert_eq!(instance.workload_factor(1, 1), 1.0);
}

#[test]
fn test_admission_days_clipped_to_horizon() {
    let instance = Instance::try_from(data()).unwrap();

    assert_eq!(instance.admission_days(0), 0..=2);
    assert_eq!(instance.admission_days(1), 3..=4);
    assert!(instance.admits(1, 4));
    assert!(!instance.admits(1, 5));
}

#[test]
fn test_patient_helpers() {
    let p = patient("p", 0, 2, 6, 3);

    assert_eq!(p.window_width(), 4);
    assert_eq!(p.delay(1), 0);
    assert_eq!(p.delay(5), 3);
    assert!(p.occupies(2, 4));
    assert!(!p.occupies(2, 5));
    assert_eq!(p.workload_on(7), 0.0);
}

#[test]
fn test_rejects_empty_horizon() {
    let mut d = data();
    d.horizon = 0;

    assert_eq!(Instance::try_from(d), Err(ModelError::EmptyHorizon));
}

#[test]
fn test_rejects_unknown_specialization() {
    let mut d = data();
    d.patients[0].specialization = 9;

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::UnknownSpecialization { index: 9, .. })
    ));
}

#[test]
fn test_rejects_short_carryover() {
    let mut d = data();
    d.wards[0].carryover_workload.pop();

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::HorizonLength {
            field: "carryover_workload",
            expected: 5,
            found: 4,
            ..
        })
    ));
}

#[test]
fn test_rejects_inverted_window() {
    let mut d = data();
    d.patients[0].earliest = 3;
    d.patients[0].latest = 1;

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::InvalidWindow { .. })
    ));
}

#[test]
fn test_rejects_window_after_horizon() {
    let mut d = data();
    d.patients[1].earliest = 5;

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::WindowOutsideHorizon { horizon: 5, .. })
    ));
}

#[test]
fn test_rejects_short_workload_profile() {
    let mut d = data();
    d.patients[0].workload = vec![1.0];

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::ShortWorkloadProfile {
            length_of_stay: 2,
            profile: 1,
            ..
        })
    ));
}

#[test]
fn test_rejects_zero_workload_capacity() {
    let mut d = data();
    d.wards[1].workload_capacity = 0.0;

    assert!(matches!(
        Instance::try_from(d),
        Err(ModelError::NonPositiveWorkloadCapacity { .. })
    ));
}

#[test]
fn test_rejects_patient_without_ward() {
    let mut d = data();
    d.specializations.push(spec("neuro", 5));
    d.patients[0].specialization = 2;

    assert_eq!(
        Instance::try_from(d),
        Err(ModelError::NoCompatibleWard {
            patient: "p0".to_string()
        })
    );
}

#[test]
fn test_allocation_set_returns_previous() {
    let mut allocation = Allocation::new(vec![Assignment::new(0, 0), Assignment::new(1, 3)]);

    let old = allocation.set(1, Assignment::new(0, 4));

    assert_eq!(old, Assignment::new(1, 3));
    assert_eq!(allocation[1], Assignment::new(0, 4));
    assert_eq!(allocation.len(), 2);
}

#[test]
fn test_allocation_size_checked_against_instance() {
    let instance = Instance::try_from(data()).unwrap();

    let err = Allocation::for_instance(&instance, vec![Assignment::new(0, 0)]).unwrap_err();

    assert_eq!(
        err,
        ModelError::AllocationSize {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_assignment_builders() {
    let a = Assignment::new(1, 2);

    assert_eq!(a.with_day(4), Assignment::new(1, 4));
    assert_eq!(a.with_ward(0), Assignment::new(0, 2));
    assert_eq!(a.to_string(), "(ward 1, day 2)");
}

#[cfg(feature = "serde")]
#[test]
fn test_instance_json_is_validated() {
    let instance = Instance::try_from(data()).unwrap();
    let json = serde_json::to_string(&instance).unwrap();

    let back: Instance = serde_json::from_str(&json).unwrap();
    assert_eq!(back, instance);

    let broken = json.replace("\"horizon\":5", "\"horizon\":0");
    assert!(serde_json::from_str::<Instance>(&broken).is_err());
}
