//! Random number generation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator used by every randomized component.
pub type SolverRng = ChaCha8Rng;

/// Seeded generator when `seed` is set, entropy-seeded otherwise.
pub fn solver_rng(seed: Option<u64>) -> SolverRng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}
