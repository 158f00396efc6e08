//! Amplitude envelopes for whole-buffer effects.

use super::buffer::{SampleBuffer, sample_count};

/// Time-varying gain curve, evaluated from the start of a buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Unity gain.
    Constant,
    /// `exp(-rate·t)`.
    Exponential { rate: f64 },
    /// Bell-shaped hump `exp(-sharpness·(t - center)²)`, zero at `t = 0`.
    Gaussian { center: f64, sharpness: f64 },
}

impl Envelope {
    /// Gain at `t` seconds.
    pub fn level(&self, t: f64) -> f64 {
        match *self {
            Envelope::Constant => 1.0,
            Envelope::Exponential { rate } => (-rate * t).exp(),
            Envelope::Gaussian { center, sharpness } => {
                if t > 0.0 {
                    (-sharpness * (t - center).powi(2)).exp()
                } else {
                    0.0
                }
            }
        }
    }

    /// Multiply `buffer` by this envelope in place.
    pub fn apply(&self, buffer: &mut SampleBuffer) {
        if *self != Envelope::Constant {
            buffer.shape(|t| self.level(t));
        }
    }
}

/// Linear ramp from 1 to 0 over the last `seconds` of `buffer`.
///
/// The final sample lands exactly on zero. If the buffer is shorter than the
/// ramp, the ramp covers the whole buffer.
pub fn fade_out_tail(buffer: &mut SampleBuffer, seconds: f64) {
    let len = buffer.len();
    let ramp = sample_count(seconds, buffer.sample_rate()).min(len);
    if ramp == 0 {
        return;
    }

    let start = len - ramp;
    let steps = (ramp - 1) as f64;
    for (i, s) in buffer.samples_mut()[start..].iter_mut().enumerate() {
        // a one-sample ramp is just its zero endpoint
        *s *= if steps == 0.0 { 0.0 } else { 1.0 - i as f64 / steps };
    }
}
