//! Validated, read-only problem instance.

use std::ops::RangeInclusive;

use super::{Patient, Specialization, Ward};
use crate::error::ModelError;

/// Per-unit costs shared across the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    /// Cost of each day of admission delay.
    pub delay: f64,
    /// Cost of each unit of theatre time used beyond the daily budget.
    pub overtime: f64,
    /// Cost of each unit of theatre budget left unused.
    pub undertime: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            delay: 1.0,
            overtime: 1.0,
            undertime: 1.0,
        }
    }
}

/// Raw instance data, before validation.
///
/// This is the shape an external parser produces. Convert it with
/// [`Instance::try_from`] to obtain a validated [`Instance`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceData {
    /// Number of days in the planning horizon.
    pub horizon: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: CostWeights,
    pub specializations: Vec<Specialization>,
    pub wards: Vec<Ward>,
    pub patients: Vec<Patient>,
}

/// A validated problem instance.
///
/// Holds the facts of one planning run together with derived lookup tables
/// (compatible wards and admissible days per patient). Never mutated by the
/// solver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InstanceData", into = "InstanceData")
)]
pub struct Instance {
    horizon: usize,
    weights: CostWeights,
    specializations: Vec<Specialization>,
    wards: Vec<Ward>,
    patients: Vec<Patient>,
    compatible_wards: Vec<Vec<usize>>,
}

impl Instance {
    /// Validates the given facts and builds an instance.
    pub fn new(
        horizon: usize,
        weights: CostWeights,
        specializations: Vec<Specialization>,
        wards: Vec<Ward>,
        patients: Vec<Patient>,
    ) -> Result<Self, ModelError> {
        Self::try_from(InstanceData {
            horizon,
            weights,
            specializations,
            wards,
            patients,
        })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn specializations(&self) -> &[Specialization] {
        &self.specializations
    }

    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    pub fn ward_count(&self) -> usize {
        self.wards.len()
    }

    pub fn specialization_count(&self) -> usize {
        self.specializations.len()
    }

    pub fn patient(&self, index: usize) -> &Patient {
        &self.patients[index]
    }

    pub fn ward(&self, index: usize) -> &Ward {
        &self.wards[index]
    }

    pub fn specialization(&self, index: usize) -> &Specialization {
        &self.specializations[index]
    }

    /// Wards able to treat the patient, in ward order. Never empty.
    pub fn compatible_wards(&self, patient: usize) -> &[usize] {
        &self.compatible_wards[patient]
    }

    /// Admissible days for the patient, clipped to the horizon.
    pub fn admission_days(&self, patient: usize) -> RangeInclusive<usize> {
        let p = &self.patients[patient];
        p.earliest..=p.latest.min(self.horizon - 1)
    }

    /// Returns true if `day` is admissible for the patient.
    pub fn admits(&self, patient: usize, day: usize) -> bool {
        self.admission_days(patient).contains(&day)
    }

    /// Returns true if the patient may be placed in `ward`.
    pub fn is_compatible(&self, patient: usize, ward: usize) -> bool {
        self.wards
            .get(ward)
            .is_some_and(|w| w.accepts(self.patients[patient].specialization))
    }

    /// Multiplier on the patient's workload when treated in `ward`.
    ///
    /// One in a ward of the patient's major specialization, the
    /// specialization's discount factor where it is only minor.
    pub fn workload_factor(&self, patient: usize, ward: usize) -> f64 {
        let spec = self.patients[patient].specialization;
        if self.wards[ward].is_minor(spec) {
            self.specializations[spec].workload_factor
        } else {
            1.0
        }
    }

    /// Consumes the instance, returning its raw data.
    pub fn into_data(self) -> InstanceData {
        InstanceData {
            horizon: self.horizon,
            weights: self.weights,
            specializations: self.specializations,
            wards: self.wards,
            patients: self.patients,
        }
    }
}

impl TryFrom<InstanceData> for Instance {
    type Error = ModelError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        let horizon = data.horizon;
        if horizon == 0 {
            return Err(ModelError::EmptyHorizon);
        }
        let spec_count = data.specializations.len();

        for spec in &data.specializations {
            check_horizon(&spec.name, "theatre_time", spec.theatre_time.len(), horizon)?;
        }

        for ward in &data.wards {
            check_spec(&ward.name, ward.major_specialization, spec_count)?;
            for &minor in &ward.minor_specializations {
                check_spec(&ward.name, minor, spec_count)?;
            }
            check_horizon(
                &ward.name,
                "carryover_patients",
                ward.carryover_patients.len(),
                horizon,
            )?;
            check_horizon(
                &ward.name,
                "carryover_workload",
                ward.carryover_workload.len(),
                horizon,
            )?;
            if ward.workload_capacity.is_nan() || ward.workload_capacity <= 0.0 {
                return Err(ModelError::NonPositiveWorkloadCapacity {
                    ward: ward.name.clone(),
                });
            }
        }

        let mut compatible_wards = Vec::with_capacity(data.patients.len());
        for patient in &data.patients {
            check_spec(&patient.name, patient.specialization, spec_count)?;
            if patient.earliest > patient.latest {
                return Err(ModelError::InvalidWindow {
                    patient: patient.name.clone(),
                    earliest: patient.earliest,
                    latest: patient.latest,
                });
            }
            if patient.earliest >= horizon {
                return Err(ModelError::WindowOutsideHorizon {
                    patient: patient.name.clone(),
                    earliest: patient.earliest,
                    horizon,
                });
            }
            if patient.length_of_stay == 0 {
                return Err(ModelError::ZeroLengthOfStay {
                    patient: patient.name.clone(),
                });
            }
            if patient.workload.len() < patient.length_of_stay {
                return Err(ModelError::ShortWorkloadProfile {
                    patient: patient.name.clone(),
                    length_of_stay: patient.length_of_stay,
                    profile: patient.workload.len(),
                });
            }

            let wards: Vec<usize> = data
                .wards
                .iter()
                .enumerate()
                .filter(|(_, w)| w.accepts(patient.specialization))
                .map(|(i, _)| i)
                .collect();
            if wards.is_empty() {
                return Err(ModelError::NoCompatibleWard {
                    patient: patient.name.clone(),
                });
            }
            compatible_wards.push(wards);
        }

        Ok(Self {
            horizon,
            weights: data.weights,
            specializations: data.specializations,
            wards: data.wards,
            patients: data.patients,
            compatible_wards,
        })
    }
}

impl From<Instance> for InstanceData {
    fn from(instance: Instance) -> Self {
        instance.into_data()
    }
}

fn check_spec(owner: &str, index: usize, count: usize) -> Result<(), ModelError> {
    if index < count {
        Ok(())
    } else {
        Err(ModelError::UnknownSpecialization {
            owner: owner.to_string(),
            index,
        })
    }
}

fn check_horizon(
    owner: &str,
    field: &'static str,
    found: usize,
    expected: usize,
) -> Result<(), ModelError> {
    if found == expected {
        Ok(())
    } else {
        Err(ModelError::HorizonLength {
            owner: owner.to_string(),
            field,
            expected,
            found,
        })
    }
}
