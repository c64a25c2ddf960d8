//! Randomness and wall-clock ports.
//!
//! Template selection, identifier suffixes and timestamps go through these
//! traits instead of ambient global calls, so synthesis and publishing can
//! be made deterministic in tests.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of uniformly distributed indices.
///
/// Implementations must be safe to share across concurrent requests.
pub trait RandomSource: Send + Sync {
    /// Return an index in `0..upper`. Returns 0 when `upper` is 0.
    fn index(&self, upper: usize) -> usize;

    /// Random string of uppercase ASCII letters and digits.
    fn upper_alphanumeric(&self, len: usize) -> String {
        (0..len)
            .map(|_| UPPER_ALPHANUMERIC[self.index(UPPER_ALPHANUMERIC.len())] as char)
            .collect()
    }
}

/// Thread-local RNG; the production source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::rng().random_range(0..upper)
    }
}

/// Seeded RNG for reproducible runs.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        // A poisoned lock still holds a usable RNG state.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(0..upper)
    }
}

/// Always returns the same index, clamped to the valid range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn index(&self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.0.min(upper - 1)
    }
}

/// Wall-clock access.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_thread_random_in_range() {
        let rng = ThreadRandom;
        for _ in 0..200 {
            assert!(rng.index(5) < 5);
        }
        assert_eq!(rng.index(0), 0);
    }

    #[test]
    fn test_seeded_random_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        let seq_a: Vec<_> = (0..20).map(|_| a.index(100)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.index(100)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_fixed_index_clamps() {
        assert_eq!(FixedIndex(3).index(5), 3);
        assert_eq!(FixedIndex(9).index(5), 4);
        assert_eq!(FixedIndex(9).index(0), 0);
    }

    #[test]
    fn test_upper_alphanumeric() {
        let s = ThreadRandom.upper_alphanumeric(12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        assert_eq!(FixedIndex(0).upper_alphanumeric(3), "AAA");
    }

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }
}
