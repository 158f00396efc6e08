//! Reverb: a single-tap recursive feedback delay (comb filter).
//!
//! ```text
//! y[n] = x[n] + decay * y[n - delay]
//! ```
//!
//! The tap reads the filter's own output, so echoes compound: an impulse
//! comes back after `delay` samples at `decay`, after `2·delay` at `decay²`,
//! and so on. Cascading two combs with different delays gives a denser,
//! more diffuse tail than either alone.

use serde::{Deserialize, Serialize};

use super::buffer::SampleBuffer;

/// One feedback comb stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDelay {
    /// Feedback gain, kept inside `[0, 0.99]` for stability.
    pub decay: f64,
    /// Delay in milliseconds.
    pub delay_ms: f64,
}

impl FeedbackDelay {
    pub fn new(decay: f64, delay_ms: f64) -> Self {
        FeedbackDelay {
            decay: decay.clamp(0.0, 0.99),
            delay_ms: delay_ms.max(0.0),
        }
    }

    /// Delay length in samples, `round(delay_ms·rate/1000)`.
    ///
    /// A zero-sample delay feeds each sample back onto itself, so the stage
    /// scales the input by `1 + decay`.
    pub fn delay_samples(&self, sample_rate: u32) -> usize {
        (self.delay_ms * sample_rate as f64 / 1000.0).round() as usize
    }

    /// Run the comb over `buffer`, returning a wet buffer of the same length.
    pub fn process(&self, buffer: &SampleBuffer) -> SampleBuffer {
        let delay = self.delay_samples(buffer.sample_rate());
        let mut wet = buffer.clone();
        let out = wet.samples_mut();
        for i in delay..out.len() {
            out[i] += out[i - delay] * self.decay;
        }
        wet
    }
}

/// Apply one comb stage to `buffer`.
pub fn apply_reverb(buffer: &SampleBuffer, decay: f64, delay_ms: f64) -> SampleBuffer {
    FeedbackDelay::new(decay, delay_ms).process(buffer)
}

/// Apply `stages` in order, each feeding the next.
pub fn apply_chain(buffer: &SampleBuffer, stages: &[FeedbackDelay]) -> SampleBuffer {
    stages
        .iter()
        .fold(buffer.clone(), |acc, stage| stage.process(&acc))
}

/// Blend `dry·(1 - wet_mix) + wet·wet_mix`. The result has the dry length.
pub fn dry_wet(dry: &SampleBuffer, wet: &SampleBuffer, wet_mix: f64) -> SampleBuffer {
    let mix = wet_mix.clamp(0.0, 1.0);
    let mut out = dry.clone();
    out.scale(1.0 - mix);
    out.accumulate(wet.samples(), mix);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(len: usize, rate: u32) -> SampleBuffer {
        let mut data = vec![0.0; len];
        data[0] = 1.0;
        SampleBuffer::new(data, rate)
    }

    #[test]
    fn echoes_compound() {
        let wet = apply_reverb(&impulse(40, 1000), 0.5, 10.0);
        let s = wet.samples();
        assert_eq!(s[0], 1.0);
        assert_eq!(s[10], 0.5);
        assert_eq!(s[20], 0.25);
        assert_eq!(s[30], 0.125);
        assert_eq!(s[5], 0.0);
    }

    #[test]
    fn keeps_length() {
        let b = SampleBuffer::new(vec![0.3; 1234], 44100);
        assert_eq!(apply_reverb(&b, 0.4, 120.0).len(), 1234);

        // delay longer than the buffer is a plain copy
        let short = SampleBuffer::new(vec![0.3; 10], 44100);
        assert_eq!(apply_reverb(&short, 0.4, 120.0), short);
    }

    #[test]
    fn is_causal() {
        let base: Vec<f64> = (0..500).map(|i| ((i * 7) % 13) as f64 / 13.0 - 0.5).collect();
        let a = apply_reverb(&SampleBuffer::new(base.clone(), 8000), 0.4, 3.0);

        let mut changed = base;
        for v in changed[300..].iter_mut() {
            *v = 1.0;
        }
        let b = apply_reverb(&SampleBuffer::new(changed, 8000), 0.4, 3.0);

        assert_eq!(&a.samples()[..300], &b.samples()[..300]);
        assert_ne!(a.samples()[300], b.samples()[300]);
    }

    #[test]
    fn delay_rounds_and_clamps() {
        assert_eq!(FeedbackDelay::new(0.3, 250.0).delay_samples(44100), 11025);
        assert_eq!(FeedbackDelay::new(0.3, 0.0).delay_samples(44100), 0);
        // 0.01 ms at 44.1 kHz is under half a sample
        assert_eq!(FeedbackDelay::new(0.3, 0.01).delay_samples(44100), 0);
        assert_eq!(FeedbackDelay::new(0.3, -5.0).delay_samples(44100), 0);
        assert_eq!(FeedbackDelay::new(1.5, 10.0).decay, 0.99);
    }

    #[test]
    fn zero_delay_scales_by_one_plus_decay() {
        let dry = SampleBuffer::new(vec![0.5, -0.25, 0.0, 1.0], 1000);
        let wet = apply_reverb(&dry, 0.5, 0.0);
        assert_eq!(wet.samples(), &[0.75, -0.375, 0.0, 1.5]);
    }

    #[test]
    fn chain_cascades_two_taps() {
        let stages = [FeedbackDelay::new(0.4, 10.0), FeedbackDelay::new(0.3, 25.0)];
        let wet = apply_chain(&impulse(100, 1000), &stages);
        let s = wet.samples();
        assert!((s[10] - 0.4).abs() < 1e-12);
        assert!((s[25] - 0.3).abs() < 1e-12);
        // 10 + 25: one trip through each comb
        assert!((s[35] - 0.4 * 0.3).abs() < 1e-12);
    }

    #[test]
    fn dry_wet_blends_halves() {
        let dry = SampleBuffer::new(vec![1.0, 0.0], 10);
        let wet = SampleBuffer::new(vec![0.0, 1.0], 10);
        let out = dry_wet(&dry, &wet, 0.5);
        assert_eq!(out.samples(), &[0.5, 0.5]);
    }
}
