//! Random number generation for the arena.
//!
//! Every [`Simulation`](crate::simulation::Simulation) owns exactly one generator,
//! seeded from [`Parameters::seed`](crate::parameters::Parameters). Placement, shelter and
//! death fates, transmission draws and shelter deflection all consume from that one
//! stream, so a run is reproducible bit-for-bit given its seed and parameters.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// The generator type owned by a simulation.
pub type SimulationRng = SmallRng;

/// Creates a generator from a base seed.
#[must_use]
pub fn seeded_rng(seed: u64) -> SimulationRng {
    SmallRng::seed_from_u64(seed)
}

/// The seed used for the `run`-th consecutive run of a batch started from `base_seed`.
#[must_use]
pub fn run_seed(base_seed: u64, run: u32) -> u64 {
    base_seed.wrapping_add(u64::from(run))
}

/// Returns `true` with probability `rate`. Always consumes exactly one draw, even when
/// `rate` is 0 or 1.
pub fn rate_passes<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> bool {
    rng.random::<f64>() < rate
}

/// A uniform draw from `[-half_width, half_width)`.
pub fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, half_width: f64) -> f64 {
    rng.random::<f64>() * 2.0 * half_width - half_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn same_seed_same_stream() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(42);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seed_different_stream() {
        let mut a = seeded_rng(42);
        let mut b = seeded_rng(88);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn rate_extremes() {
        let mut rng = seeded_rng(7);
        for _ in 0..1000 {
            assert!(!rate_passes(&mut rng, 0.0));
            assert!(rate_passes(&mut rng, 1.0));
        }
    }

    #[test]
    fn rate_passes_consumes_one_draw() {
        let mut a = seeded_rng(3);
        let mut b = seeded_rng(3);
        rate_passes(&mut a, 0.0);
        b.random::<f64>();
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn symmetric_samples_stay_in_bounds() {
        let mut rng = seeded_rng(11);
        for _ in 0..1000 {
            let value = sample_symmetric(&mut rng, 0.1);
            assert!((-0.1..0.1).contains(&value));
        }
        assert_eq!(sample_symmetric(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn run_seeds_are_consecutive() {
        assert_eq!(run_seed(10, 0), 10);
        assert_eq!(run_seed(10, 3), 13);
        assert_eq!(run_seed(u64::MAX, 1), 0);
    }
}
