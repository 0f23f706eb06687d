//! Fallback Selection Policies
//!
//! Decides which template from a pool is used when a message matches no
//! category. Production uses [`UniformPolicy`]; tests seed it or use one of
//! the deterministic policies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index into a pool of `len` candidates
pub trait SelectionPolicy: Send {
    /// Return an index in `0..len`
    ///
    /// Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random selection
#[derive(Debug)]
pub struct UniformPolicy {
    rng: StdRng,
}

impl UniformPolicy {
    /// Create a policy seeded from OS entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a policy with a specific seed for reproducibility
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionPolicy for UniformPolicy {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Cycles through the pool in order
#[derive(Debug, Default)]
pub struct RoundRobinPolicy {
    next: usize,
}

impl RoundRobinPolicy {
    /// Start at the first template
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionPolicy for RoundRobinPolicy {
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.next % len;
        self.next = idx + 1;
        idx
    }
}

/// Always picks the same index (clamped to the pool)
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy(pub usize);

impl SelectionPolicy for FixedPolicy {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut policy = UniformPolicy::new();
        for _ in 0..500 {
            assert!(policy.pick(4) < 4);
        }
    }

    #[test]
    fn test_uniform_seed_is_reproducible() {
        let mut a = UniformPolicy::with_seed(7);
        let mut b = UniformPolicy::with_seed(7);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(4)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(4)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_round_robin_cycles() {
        let mut policy = RoundRobinPolicy::new();
        let picks: Vec<usize> = (0..6).map(|_| policy.pick(4)).collect();
        assert_eq!(picks, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_fixed_clamps() {
        assert_eq!(FixedPolicy(2).pick(4), 2);
        assert_eq!(FixedPolicy(9).pick(4), 3);
    }
}
