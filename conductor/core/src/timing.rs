//! Thinking Delay
//!
//! How long the assistant appears to "think" before its reply lands.
//!
//! The default is a base delay plus uniform jitter, so replies don't arrive
//! with a metronome beat. Tests and reduced-motion surfaces use
//! [`FixedDelay`].

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default base delay before a reply (1.5s)
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1500);

/// Default maximum jitter added on top of the base delay (1s)
pub const DEFAULT_JITTER: Duration = Duration::from_millis(1000);

/// Produces the delay for each reply
pub trait ThinkingDelay: Send + Sync {
    /// Delay before the next reply is applied
    fn next_delay(&mut self) -> Duration;
}

/// Base delay plus uniform jitter in `[0, jitter)`
#[derive(Debug)]
pub struct JitteredDelay {
    /// Minimum delay
    base: Duration,
    /// Upper bound (exclusive) of the random extra delay
    jitter: Duration,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
}

impl JitteredDelay {
    /// Create a jittered delay seeded from OS entropy
    #[must_use]
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self {
            base,
            jitter,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a jittered delay with a specific seed for reproducibility
    #[must_use]
    pub fn with_seed(base: Duration, jitter: Duration, seed: u64) -> Self {
        Self {
            base,
            jitter,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shortest possible delay
    #[must_use]
    pub fn min_delay(&self) -> Duration {
        self.base
    }

    /// Longest possible delay (exclusive when jitter is non-zero)
    #[must_use]
    pub fn max_delay(&self) -> Duration {
        self.base + self.jitter
    }
}

impl Default for JitteredDelay {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_JITTER)
    }
}

impl ThinkingDelay for JitteredDelay {
    fn next_delay(&mut self) -> Duration {
        let jitter_ms = u64::try_from(self.jitter.as_millis()).unwrap_or(u64::MAX);
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(self.rng.gen_range(0..jitter_ms))
    }
}

/// The same delay every time
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    /// No delay at all
    #[must_use]
    pub fn immediate() -> Self {
        Self(Duration::ZERO)
    }
}

impl ThinkingDelay for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let delay = JitteredDelay::default();
        assert_eq!(delay.min_delay(), Duration::from_millis(1500));
        assert_eq!(delay.max_delay(), Duration::from_millis(2500));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let mut delay = JitteredDelay::with_seed(DEFAULT_BASE_DELAY, DEFAULT_JITTER, 12345);
        for _ in 0..1000 {
            let d = delay.next_delay();
            assert!(d >= delay.min_delay());
            assert!(d < delay.max_delay());
        }
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let base = Duration::from_millis(100);
        let jitter = Duration::from_millis(50);
        let mut a = JitteredDelay::with_seed(base, jitter, 99);
        let mut b = JitteredDelay::with_seed(base, jitter, 99);
        for _ in 0..10 {
            assert_eq!(a.next_delay(), b.next_delay());
        }
    }

    #[test]
    fn test_zero_jitter_is_base() {
        let mut delay = JitteredDelay::new(Duration::from_millis(300), Duration::ZERO);
        assert_eq!(delay.next_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_fixed_delay() {
        let mut delay = FixedDelay(Duration::from_secs(2));
        assert_eq!(delay.next_delay(), Duration::from_secs(2));
        assert_eq!(FixedDelay::immediate().next_delay(), Duration::ZERO);
    }
}
