//! Random number helpers.
//!
//! Every probabilistic algorithm is generic over `R: Rng`; these helpers
//! cover seeding and index sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded standard RNG.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws `k` distinct indices from `0..n`, keeping their ascending order.
///
/// Returns all indices when `k >= n`.
pub fn sample_indices<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    if k >= n {
        return (0..n).collect();
    }
    let mut picked = rand::seq::index::sample(rng, n, k).into_vec();
    picked.sort_unstable();
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_sample_indices() {
        let mut rng = create_rng(1);
        let picked = sample_indices(10, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        assert!(picked.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sample_indices(3, 5, &mut rng), vec![0, 1, 2]);
    }
}
