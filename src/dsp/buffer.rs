//! Sample buffers: mono f64 audio tagged with its sample rate.
//!
//! Every stage of the pipeline hands these around by value. Time is mapped to
//! sample indices with `round(seconds * rate)` everywhere, so two buffers built
//! for the same duration at the same rate always have the same length.

/// Number of samples covering `duration` seconds at `sample_rate`.
#[inline]
pub fn sample_count(duration: f64, sample_rate: u32) -> usize {
    if duration <= 0.0 {
        return 0;
    }
    (duration * sample_rate as f64).round() as usize
}

/// A mono buffer of floating-point samples.
///
/// Samples nominally sit in `[-1, 1]` but may exceed it until the buffer is
/// normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    data: Vec<f64>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(data: Vec<f64>, sample_rate: u32) -> Self {
        debug_assert!(sample_rate > 0, "sample rate must be positive");
        SampleBuffer { data, sample_rate }
    }

    /// A zero-length buffer.
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    /// `duration` seconds of digital silence.
    pub fn silence(duration: f64, sample_rate: u32) -> Self {
        Self::new(vec![0.0; sample_count(duration, sample_rate)], sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.sample_rate as f64
    }

    /// Absolute sample index for a time offset in seconds.
    #[inline]
    pub fn index_at(&self, time: f64) -> usize {
        (time.max(0.0) * self.sample_rate as f64).round() as usize
    }

    /// Read a sample with linear interpolation at a fractional position.
    ///
    /// Positions past the last sample hold the last value.
    pub fn read_interpolated(&self, position: f64) -> f64 {
        if self.data.is_empty() || position < 0.0 {
            return 0.0;
        }

        let idx = position as usize;
        if idx >= self.data.len() - 1 {
            return self.data[self.data.len() - 1];
        }

        let frac = position - idx as f64;
        self.data[idx] * (1.0 - frac) + self.data[idx + 1] * frac
    }

    /// Largest absolute sample value (0 for an empty buffer).
    pub fn peak(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()))
    }

    /// Multiply every sample by `gain`.
    pub fn scale(&mut self, gain: f64) {
        for s in self.data.iter_mut() {
            *s *= gain;
        }
    }

    /// Multiply every sample by `gain(t)`, where `t` is the sample time in seconds.
    pub fn shape(&mut self, gain: impl Fn(f64) -> f64) {
        let rate = self.sample_rate as f64;
        for (i, s) in self.data.iter_mut().enumerate() {
            *s *= gain(i as f64 / rate);
        }
    }

    /// Scale so the peak equals `target`. Silent buffers are left untouched.
    pub fn normalize_to(&mut self, target: f64) {
        let peak = self.peak();
        if peak > 0.0 {
            self.scale(target / peak);
        }
    }

    /// Linear fade-in and fade-out over `fade_len` samples at each end.
    ///
    /// The first and last samples become exactly zero. Buffers shorter than
    /// two fades are left alone.
    pub fn fade_edges(&mut self, fade_len: usize) {
        let len = self.data.len();
        if fade_len < 2 || len <= fade_len * 2 {
            return;
        }

        let steps = (fade_len - 1) as f64;
        for i in 0..fade_len {
            let ramp = i as f64 / steps;
            self.data[i] *= ramp;
            self.data[len - 1 - i] *= ramp;
        }
    }

    /// Sum `other` into this buffer sample by sample, scaled by `gain`.
    ///
    /// Writes stop at the end of the shorter buffer.
    pub fn accumulate(&mut self, other: &[f64], gain: f64) {
        for (dst, &src) in self.data.iter_mut().zip(other) {
            *dst += src * gain;
        }
    }

    /// Concatenate buffers that share `sample_rate` into one.
    pub fn concat(parts: &[&SampleBuffer], sample_rate: u32) -> Self {
        let total: usize = parts.iter().map(|p| p.len()).sum();
        let mut data = Vec::with_capacity(total);
        for part in parts {
            debug_assert_eq!(part.sample_rate, sample_rate, "concat rate mismatch");
            data.extend_from_slice(&part.data);
        }
        Self::new(data, sample_rate)
    }
}
