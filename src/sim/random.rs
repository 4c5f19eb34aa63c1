//! Gap placement randomness
//!
//! Obstacle gaps are drawn through the [`GapSource`] trait so a session can be
//! replayed exactly in tests. The default source is a seeded PCG stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniformly distributed gap centers
pub trait GapSource {
    /// Uniform value in `[min, max]`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// Any `FnMut(min, max) -> f32` works as a scripted source
impl<F> GapSource for F
where
    F: FnMut(f32, f32) -> f32,
{
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        self(min, max)
    }
}

/// Seeded PCG gap source
#[derive(Debug, Clone)]
pub struct PcgGapSource {
    seed: u64,
    rng: Pcg32,
}

impl PcgGapSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl GapSource for PcgGapSource {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
