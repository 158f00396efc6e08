//! Noise sources drawn from a seedable PCG generator.

use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::buffer::{SampleBuffer, sample_count};
use super::filter::{Filter, IirFilter};

/// Numerator of the 3-pole/3-zero 1/f approximation.
pub const PINK_B: [f64; 4] = [0.049922035, -0.095993537, 0.050612699, -0.004408786];
/// Denominator of the 3-pole/3-zero 1/f approximation.
pub const PINK_A: [f64; 4] = [1.0, -2.494956002, 2.017265875, -0.522189400];

/// Spectral color of a noise buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseColor {
    White,
    Pink,
}

/// Seed used when no seed is given and the `entropy` feature is off.
pub const DEFAULT_SEED: u64 = 0x6a69_6e67_6c65;

/// Gaussian noise generator.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: Pcg32,
}

impl NoiseSource {
    /// Deterministic source: equal seeds yield identical noise.
    pub fn seeded(seed: u64) -> Self {
        NoiseSource {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Source seeded from the thread RNG.
    #[cfg(feature = "entropy")]
    pub fn from_entropy() -> Self {
        NoiseSource {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Seeded when `seed` is set. Otherwise fresh entropy, or
    /// [`DEFAULT_SEED`] in builds without an OS RNG.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            #[cfg(feature = "entropy")]
            None => Self::from_entropy(),
            #[cfg(not(feature = "entropy"))]
            None => Self::seeded(DEFAULT_SEED),
        }
    }

    /// `len` i.i.d. samples from N(0, 1).
    pub fn white(&mut self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|_| -> f64 { StandardNormal.sample(&mut self.rng) })
            .collect()
    }

    /// `duration` seconds of noise of the given color.
    pub fn generate(&mut self, duration: f64, color: NoiseColor, sample_rate: u32) -> SampleBuffer {
        let white = SampleBuffer::new(self.white(sample_count(duration, sample_rate)), sample_rate);
        match color {
            NoiseColor::White => white,
            NoiseColor::Pink => IirFilter::new(&PINK_B, &PINK_A).apply(&white),
        }
    }
}
