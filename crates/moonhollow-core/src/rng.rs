//! Random number generator abstraction for determinism.
//!
//! Role assignment and night-action tie-breaks draw through this trait so
//! tests can inject a seeded or scripted implementation.

use rand::Rng;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Pick an index uniformly in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Shuffle a slice of strings in place (Fisher–Yates).
    fn shuffle(&mut self, items: &mut [String]) {
        for i in (1..items.len()).rev() {
            let j = self.pick_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// Production RNG backed by the thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRng;

impl DeterministicRng for ThreadRng {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_stays_in_bounds() {
        let mut rng = ThreadRng;
        for _ in 0..100 {
            assert!(rng.pick_index(3) < 3);
        }
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = ThreadRng;
        let mut items: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| (*s).into()).collect();
        rng.shuffle(&mut items);
        items.sort();
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }
}
