use crate::formulation::Constraint;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffles constraint order, then the term order inside each constraint. Semantics are
/// unchanged; only the presentation handed to the solver differs.
pub fn permute<R: Rng + ?Sized>(constraints: &mut [Constraint], rng: &mut R) {
    constraints.shuffle(rng);
    for constraint in constraints.iter_mut() {
        constraint.terms.shuffle(rng);
    }
}

/// [`permute`] with a fresh RNG seeded from `seed`.
pub fn permute_seeded(constraints: &mut [Constraint], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    permute(constraints, &mut rng);
    tracing::debug!(seed, constraints = constraints.len(), "permuted constraints");
}
