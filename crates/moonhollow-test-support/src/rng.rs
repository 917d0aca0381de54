//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use moonhollow_core::rng::DeterministicRng;

/// An RNG that returns indices from a predetermined sequence, or — in
/// identity mode — always the last valid index, which turns a Fisher–Yates
/// shuffle into a no-op.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<usize>,
    index: usize,
    identity: bool,
}

impl SequenceRng {
    /// An RNG scripted with specific indices. Panics when the sequence runs
    /// out, so tests fail instead of drifting.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            index: 0,
            identity: false,
        }
    }

    /// An RNG whose `pick_index(len)` always returns `len - 1`. Shuffles
    /// through it leave their input order unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            values: Vec::new(),
            index: 0,
            identity: true,
        }
    }
}

impl DeterministicRng for SequenceRng {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.identity {
            return len - 1;
        }
        let value = self.values[self.index];
        self.index += 1;
        assert!(value < len, "scripted index {value} out of range for len {len}");
        value
    }
}
