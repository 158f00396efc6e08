//! Voice: tone generators the mixer renders notes with.

use serde::{Deserialize, Serialize};

use super::oscillator::{self, FmParams, fm_tone, sine};

/// Something that can render one note as a fresh run of samples.
pub trait Voice {
    /// Sample value `t` seconds after the note starts.
    fn sample(&self, frequency: f64, t: f64) -> f64;

    /// Render `duration` seconds of a note over `[0, duration)`.
    fn render(&self, frequency: f64, duration: f64, sample_rate: u32) -> Vec<f64> {
        oscillator::render(duration, sample_rate, |t| self.sample(frequency, t))
    }
}

/// Two-operator FM voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FmVoice {
    pub params: FmParams,
}

impl FmVoice {
    pub const fn marimba() -> Self {
        FmVoice {
            params: FmParams::MARIMBA,
        }
    }

    pub const fn bell() -> Self {
        FmVoice {
            params: FmParams::BELL,
        }
    }
}

impl Voice for FmVoice {
    fn sample(&self, frequency: f64, t: f64) -> f64 {
        fm_tone(frequency, t, &self.params)
    }
}

/// Plain sine under an exponential decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SineVoice {
    /// Decay rate `k` of `exp(-k·t)`; zero holds the tone at full level.
    pub decay: f64,
}

impl SineVoice {
    pub const fn new(decay: f64) -> Self {
        SineVoice { decay }
    }
}

impl Voice for SineVoice {
    fn sample(&self, frequency: f64, t: f64) -> f64 {
        sine(frequency, t) * (-self.decay * t).exp()
    }
}
