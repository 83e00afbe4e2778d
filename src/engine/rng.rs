//! Random sources.
//!
//! The engine never calls an ambient RNG; every draw goes through a
//! [`RandomSource`] handed to it at construction so tests can force
//! outcomes and simulations can be replayed from a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Capability producing uniform draws.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` is always at least 1.
    fn next_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

// ---------------------------------------------------------------------------
// Production source
// ---------------------------------------------------------------------------

/// `StdRng`-backed source, seeded from the OS or from a fixed seed.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len.max(1))
    }
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// Replays fixed draw sequences, cycling when a sequence runs out.
///
/// An empty unit script yields `0.0` (always below any positive win
/// probability); an empty index script yields `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    units: Vec<f64>,
    indices: Vec<usize>,
    unit_pos: usize,
    index_pos: usize,
}

impl ScriptedRandom {
    pub fn new(units: Vec<f64>, indices: Vec<usize>) -> Self {
        Self {
            units,
            indices,
            unit_pos: 0,
            index_pos: 0,
        }
    }

    /// Only unit draws, e.g. for the binary model.
    pub fn units(units: Vec<f64>) -> Self {
        Self::new(units, Vec::new())
    }

    /// Only index draws, e.g. for natural reel sampling.
    pub fn indices(indices: Vec<usize>) -> Self {
        Self::new(Vec::new(), indices)
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.unit_pos % self.units.len()];
        self.unit_pos += 1;
        value
    }

    fn next_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() || len == 0 {
            return 0;
        }
        let value = self.indices[self.index_pos % self.indices.len()];
        self.index_pos += 1;
        value % len
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
