//! Seeded random instances.
//!
//! Bed capacity is sized from the expected occupancy so that generated
//! instances are feasible for the constructive heuristic in practice.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wardplan_core::{CostWeights, Instance, Patient, Specialization, Ward};

/// Shape of a generated instance.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub horizon: usize,
    pub specializations: usize,
    pub wards: usize,
    pub patients: usize,
    pub max_window: usize,
    pub max_stay: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            horizon: 10,
            specializations: 3,
            wards: 4,
            patients: 30,
            max_window: 4,
            max_stay: 4,
            seed: 42,
        }
    }
}

/// Builds a random instance. Identical configs yield identical instances.
pub fn generate(config: &GeneratorConfig) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let horizon = config.horizon.max(1);
    let spec_count = config.specializations.max(1);
    let ward_count = config.wards.max(1);

    let specializations: Vec<Specialization> = (0..spec_count)
        .map(|s| Specialization {
            name: format!("S{s}"),
            theatre_time: (0..horizon).map(|_| rng.random_range(2.0..6.0)).collect(),
            workload_factor: rng.random_range(0.3..0.9),
        })
        .collect();

    let mean_stay = (config.max_stay.max(1) + 1) as f64 / 2.0;
    let beds_needed = config.patients as f64 * mean_stay / horizon as f64;
    let beds_per_ward = (beds_needed / ward_count as f64 * 2.0).ceil().max(1.0) as u32 + 1;

    let wards: Vec<Ward> = (0..ward_count)
        .map(|w| {
            let major = w % spec_count;
            let minor_specializations = (0..spec_count)
                .filter(|&s| s != major && rng.random_bool(0.4))
                .collect();
            Ward {
                name: format!("W{w}"),
                bed_capacity: beds_per_ward,
                workload_capacity: rng.random_range(5.0..15.0),
                major_specialization: major,
                minor_specializations,
                carryover_patients: vec![0; horizon],
                carryover_workload: (0..horizon).map(|_| rng.random_range(0.0..1.0)).collect(),
            }
        })
        .collect();

    let patients: Vec<Patient> = (0..config.patients)
        .map(|p| {
            let length_of_stay = rng.random_range(1..=config.max_stay.max(1));
            let earliest = rng.random_range(0..horizon);
            let latest = (earliest + rng.random_range(0..=config.max_window)).min(horizon - 1);
            Patient {
                name: format!("P{p}"),
                specialization: rng.random_range(0..spec_count),
                earliest,
                latest,
                length_of_stay,
                surgery_duration: rng.random_range(0.5..3.0),
                workload: (0..length_of_stay)
                    .map(|_| rng.random_range(0.5..2.0))
                    .collect(),
            }
        })
        .collect();

    // Specializations without any ward are remapped to ward 0's major.
    let patients = patients
        .into_iter()
        .map(|mut p| {
            if !wards.iter().any(|w| w.accepts(p.specialization)) {
                p.specialization = wards[0].major_specialization;
            }
            p
        })
        .collect();

    match Instance::new(horizon, CostWeights::default(), specializations, wards, patients) {
        Ok(instance) => instance,
        Err(err) => panic!("generator produced an invalid instance: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_reproducible() {
        let config = GeneratorConfig::default();
        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn test_generate_respects_shape() {
        let config = GeneratorConfig {
            patients: 12,
            wards: 2,
            specializations: 4,
            ..GeneratorConfig::default()
        };
        let instance = generate(&config);

        assert_eq!(instance.patient_count(), 12);
        assert_eq!(instance.ward_count(), 2);
        for p in 0..instance.patient_count() {
            assert!(!instance.compatible_wards(p).is_empty());
        }
    }
}
