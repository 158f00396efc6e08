//! Linear-interpolation sample-rate conversion.
//!
//! No anti-aliasing filter is applied. Inputs are synthesized effects and
//! speech recordings that are already band-limited well below either rate.

use super::buffer::SampleBuffer;

/// Convert `buffer` to `new_rate`.
///
/// The output holds `round(duration * new_rate)` samples; output sample `i`
/// reads the source at fractional index `i * old_len / new_len`. Equal rates
/// return the input unchanged and an empty input stays empty.
pub fn resample(buffer: &SampleBuffer, new_rate: u32) -> SampleBuffer {
    if buffer.sample_rate() == new_rate {
        return buffer.clone();
    }
    if buffer.is_empty() {
        return SampleBuffer::empty(new_rate);
    }

    let old_len = buffer.len();
    let new_len = (buffer.duration() * new_rate as f64).round() as usize;
    if new_len == 0 {
        return SampleBuffer::empty(new_rate);
    }

    let step = old_len as f64 / new_len as f64;
    let data = (0..new_len)
        .map(|i| buffer.read_interpolated(i as f64 * step))
        .collect();
    SampleBuffer::new(data, new_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn identity_when_rates_match() {
        let b = SampleBuffer::new(vec![0.1, -0.2, 0.3], 44100);
        assert_eq!(resample(&b, 44100), b);
    }

    #[test]
    fn empty_stays_empty() {
        let b = SampleBuffer::empty(16000);
        let r = resample(&b, 44100);
        assert!(r.is_empty());
        assert_eq!(r.sample_rate(), 44100);
    }

    #[test]
    fn upsample_interpolates_ramp() {
        let b = SampleBuffer::new(vec![0.0, 1.0, 2.0, 3.0], 100);
        let r = resample(&b, 200);
        assert_eq!(r.len(), 8);
        let expected = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.0];
        for (a, e) in r.samples().iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "got {a}, expected {e}");
        }
    }

    #[test]
    fn preserves_duration() {
        for (from, to, len) in [(16000, 44100, 32000), (48000, 44100, 12345), (22050, 44100, 7)] {
            let b = SampleBuffer::new(vec![0.0; len], from);
            let r = resample(&b, to);
            let err = (r.duration() - b.duration()).abs();
            assert!(
                err <= 1.0 / to as f64,
                "{from}->{to}: duration drifted by {err}s"
            );
        }
    }

    #[test]
    fn downsampled_sine_tracks_analytic() {
        let freq = 440.0;
        let data = (0..4800)
            .map(|i| (2.0 * PI * freq * i as f64 / 48000.0).sin())
            .collect();
        let b = SampleBuffer::new(data, 48000);
        let r = resample(&b, 44100);
        assert_eq!(r.len(), 4410);
        for (i, &s) in r.samples().iter().enumerate().take(4400) {
            let expected = (2.0 * PI * freq * i as f64 / 44100.0).sin();
            assert!((s - expected).abs() < 1e-3, "sample {i}: {s} vs {expected}");
        }
    }
}
