//! Named instances with known behavior.

use wardplan_core::{CostWeights, Instance};

use crate::builder::{patient, specialization, ward};

/// One ward, three patients, plenty of room.
pub fn tiny() -> Instance {
    let horizon = 4;
    Instance::new(
        horizon,
        CostWeights::default(),
        vec![specialization("general", horizon, 2.0, 0.5)],
        vec![ward("W1", 0, 2, 4.0, horizon)],
        vec![
            patient("p0", 0, (0, 2), 2, 1.0),
            patient("p1", 0, (0, 1), 1, 1.0),
            patient("p2", 0, (1, 3), 2, 1.5),
        ],
    )
    .unwrap()
}

/// Three same-day patients competing for two beds.
pub fn saturated() -> Instance {
    let horizon = 2;
    Instance::new(
        horizon,
        CostWeights::default(),
        vec![specialization("general", horizon, 3.0, 0.5)],
        vec![ward("W1", 0, 2, 4.0, horizon)],
        vec![
            patient("p0", 0, (0, 0), 1, 1.0),
            patient("p1", 0, (0, 0), 1, 1.0),
            patient("p2", 0, (0, 0), 1, 1.0),
        ],
    )
    .unwrap()
}

/// A single bed where the long-stay patient must be pushed a day forward
/// to admit the short-stay one.
pub fn repairable() -> Instance {
    let horizon = 3;
    Instance::new(
        horizon,
        CostWeights::default(),
        vec![specialization("general", horizon, 1.0, 0.5)],
        vec![ward("W1", 0, 1, 2.0, horizon)],
        vec![
            patient("short", 0, (0, 1), 1, 1.0),
            patient("long", 0, (0, 1), 2, 1.0),
        ],
    )
    .unwrap()
}

/// One patient and two wards whose normalized workload is 10 and 5.
///
/// Use with a balance-only objective (`lambda_cost = 0`).
pub fn two_wards() -> Instance {
    let horizon = 1;
    Instance::new(
        horizon,
        CostWeights::default(),
        vec![specialization("general", horizon, 1.0, 0.5)],
        vec![
            ward("narrow", 0, 1, 0.1, horizon),
            ward("wide", 0, 1, 0.2, horizon),
        ],
        vec![patient("solo", 0, (0, 0), 1, 1.0)],
    )
    .unwrap()
}

/// Two specializations, two wards, five patients with room to move.
///
/// Ward `A` treats cardiology as major and orthopedics as minor; ward `B`
/// treats orthopedics only.
pub fn five_patients() -> Instance {
    let horizon = 6;
    let mut a = ward("A", 0, 2, 3.0, horizon);
    a.minor_specializations = vec![1];
    a.carryover_patients[0] = 1;
    a.carryover_workload[0] = 0.5;
    let b = ward("B", 1, 2, 3.0, horizon);

    Instance::new(
        horizon,
        CostWeights {
            delay: 2.0,
            overtime: 1.0,
            undertime: 0.5,
        },
        vec![
            specialization("cardiology", horizon, 2.0, 0.5),
            specialization("orthopedics", horizon, 2.0, 0.7),
        ],
        vec![a, b],
        vec![
            patient("c0", 0, (0, 2), 3, 2.0),
            patient("c1", 0, (1, 4), 2, 1.5),
            patient("o0", 1, (0, 3), 2, 1.0),
            patient("o1", 1, (0, 1), 1, 2.5),
            patient("o2", 1, (2, 5), 3, 1.0),
        ],
    )
    .unwrap()
}
