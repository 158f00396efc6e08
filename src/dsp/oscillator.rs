//! Stateless oscillators evaluated over a uniform time axis.
//!
//! Every generator samples the half-open interval `[0, duration)` at the
//! target rate, so a one-second tone at 44.1 kHz has exactly 44100 samples.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use super::buffer::sample_count;

/// Periodic waveform shapes evaluated from an absolute phase in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Sawtooth,
}

impl Waveform {
    pub fn at_phase(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Sawtooth => sawtooth(phase),
        }
    }
}

/// Evaluate `f(t)` at every sample time in `[0, duration)`.
pub fn render(duration: f64, sample_rate: u32, f: impl Fn(f64) -> f64) -> Vec<f64> {
    let rate = sample_rate as f64;
    (0..sample_count(duration, sample_rate))
        .map(|i| f(i as f64 / rate))
        .collect()
}

/// `sin(2π·freq·t)`.
#[inline]
pub fn sine(freq: f64, t: f64) -> f64 {
    (TAU * freq * t).sin()
}

/// Naive rising sawtooth with period 2π: -1 at phase 0, approaching +1 just
/// before each wrap.
#[inline]
pub fn sawtooth(phase: f64) -> f64 {
    phase.rem_euclid(TAU) / PI - 1.0
}

/// Two-operator FM settings with a shared exponential decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FmParams {
    /// Peak modulator depth in radians.
    pub mod_index: f64,
    /// Modulator frequency as a multiple of the carrier.
    pub mod_ratio: f64,
    /// Decay rate `k` of the envelope `exp(-k·t)`.
    pub decay: f64,
}

impl FmParams {
    /// Woody percussive hit: fast decay, octave-up modulator.
    pub const MARIMBA: FmParams = FmParams {
        mod_index: 2.0,
        mod_ratio: 2.0,
        decay: 8.0,
    };

    /// Bright ringing bell: slower decay, deeper modulation.
    pub const BELL: FmParams = FmParams {
        mod_index: 5.0,
        mod_ratio: 2.0,
        decay: 5.0,
    };
}

/// FM carrier/modulator pair under an exponential decay envelope.
///
/// `E(t) = exp(-k·t)`, `M(t) = sin(2π·freq·ratio·t)·E(t)·index`,
/// output `sin(2π·freq·t + M(t))·E(t)`.
#[inline]
pub fn fm_tone(freq: f64, t: f64, params: &FmParams) -> f64 {
    let env = (-params.decay * t).exp();
    let modulator = sine(freq * params.mod_ratio, t) * env * params.mod_index;
    (TAU * freq * t + modulator).sin() * env
}

/// Phase track of a linear frequency sweep from `start_hz` to `end_hz`.
///
/// The instantaneous frequency ramps linearly over `len` samples (both ends
/// inclusive) and is integrated as `phase[n] = 2π·Σ_{m≤n} f[m] / rate`.
pub fn sweep_phase(start_hz: f64, end_hz: f64, len: usize, sample_rate: u32) -> Vec<f64> {
    let rate = sample_rate as f64;
    let step = if len > 1 {
        (end_hz - start_hz) / (len - 1) as f64
    } else {
        0.0
    };

    let mut cumulative = 0.0;
    (0..len)
        .map(|n| {
            cumulative += start_hz + step * n as f64;
            TAU * cumulative / rate
        })
        .collect()
}

/// A waveform swept linearly in frequency over `duration` seconds.
pub fn swept(
    waveform: Waveform,
    start_hz: f64,
    end_hz: f64,
    duration: f64,
    sample_rate: u32,
) -> Vec<f64> {
    let len = sample_count(duration, sample_rate);
    sweep_phase(start_hz, end_hz, len, sample_rate)
        .into_iter()
        .map(|phase| waveform.at_phase(phase))
        .collect()
}
