//! IIR filters: RBJ biquads, Butterworth low-pass cascades and a general
//! direct-form filter for fixed coefficient sets.
//!
//! All filters are causal and start from a zero state, matching the usual
//! offline `lfilter`/`sosfilt` semantics.

use std::f64::consts::PI;

use super::buffer::SampleBuffer;

/// A causal, sample-by-sample filter.
pub trait Filter {
    fn process(&mut self, input: f64) -> f64;

    /// Clear internal state.
    fn reset(&mut self);

    /// Filter a whole buffer from a zero state, returning a new buffer.
    fn apply(&mut self, buffer: &SampleBuffer) -> SampleBuffer {
        self.reset();
        let data = buffer.samples().iter().map(|&x| self.process(x)).collect();
        SampleBuffer::new(data, buffer.sample_rate())
    }
}

/// Filter type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    /// Second-order low-pass (RBJ cookbook).
    Lowpass,
    /// First-order low-pass, bilinear-transformed one-pole section.
    FirstOrderLowpass,
}

/// A biquad IIR filter (2nd order).
///
/// Implements the standard Direct Form II Transposed structure.
/// Coefficient formulas from the Audio EQ Cookbook (Robert Bristow-Johnson).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    pub filter_type: FilterType,
    pub frequency: f64,
    pub q: f64,

    // Coefficients
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    // State (Direct Form II Transposed)
    z1: f64,
    z2: f64,
}

impl BiquadFilter {
    pub fn new(filter_type: FilterType, frequency: f64, q: f64, sample_rate: f64) -> Self {
        let mut f = BiquadFilter {
            filter_type,
            frequency,
            q,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        };
        f.update_coefficients(sample_rate);
        f
    }

    /// Recompute filter coefficients from current parameters.
    pub fn update_coefficients(&mut self, sample_rate: f64) {
        let w0 = 2.0 * PI * self.frequency / sample_rate;

        let (b0, b1, b2, a0, a1, a2) = match self.filter_type {
            FilterType::Lowpass => {
                let cos_w0 = w0.cos();
                let alpha = w0.sin() / (2.0 * self.q);
                let b1 = 1.0 - cos_w0;
                let b0 = b1 / 2.0;
                let b2 = b0;
                let a0 = 1.0 + alpha;
                let a1 = -2.0 * cos_w0;
                let a2 = 1.0 - alpha;
                (b0, b1, b2, a0, a1, a2)
            }
            FilterType::FirstOrderLowpass => {
                let k = (w0 / 2.0).tan();
                (k, k, 0.0, 1.0 + k, k - 1.0, 0.0)
            }
        };

        // Normalize by a0
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = a1 / a0;
        self.a2 = a2 / a0;
    }
}

impl Filter for BiquadFilter {
    fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.z1;
        self.z1 = self.b1 * input - self.a1 * output + self.z2;
        self.z2 = self.b2 * input - self.a2 * output;
        output
    }

    fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

/// Butterworth low-pass of arbitrary order, realized as cascaded sections.
///
/// Even orders use `order / 2` biquads; odd orders add one first-order
/// section. Each biquad's Q comes from the analog Butterworth pole angles,
/// and the cookbook's prewarped bilinear transform keeps the -3 dB point at
/// the requested cutoff.
#[derive(Debug, Clone)]
pub struct ButterworthLowpass {
    sections: Vec<BiquadFilter>,
}

/// Design a Butterworth low-pass filter.
pub fn design_lowpass(order: usize, cutoff_hz: f64, sample_rate: u32) -> ButterworthLowpass {
    let rate = sample_rate as f64;
    let n = order.max(1);

    let mut sections: Vec<BiquadFilter> = (1..=n / 2)
        .map(|k| {
            let angle = PI * (n - 2 * k + 1) as f64 / (2 * n) as f64;
            let q = 1.0 / (2.0 * angle.cos());
            BiquadFilter::new(FilterType::Lowpass, cutoff_hz, q, rate)
        })
        .collect();

    if n % 2 == 1 {
        sections.push(BiquadFilter::new(
            FilterType::FirstOrderLowpass,
            cutoff_hz,
            0.0,
            rate,
        ));
    }

    ButterworthLowpass { sections }
}

impl ButterworthLowpass {
    pub fn order(&self) -> usize {
        self.sections
            .iter()
            .map(|s| match s.filter_type {
                FilterType::Lowpass => 2,
                FilterType::FirstOrderLowpass => 1,
            })
            .sum()
    }
}

impl Filter for ButterworthLowpass {
    fn process(&mut self, input: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(input, |x, section| section.process(x))
    }

    fn reset(&mut self) {
        for s in &mut self.sections {
            s.reset();
        }
    }
}

/// General IIR filter `a[0]·y[n] = Σ b[i]·x[n-i] - Σ_{j≥1} a[j]·y[n-j]`.
#[derive(Debug, Clone)]
pub struct IirFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl IirFilter {
    /// Build from numerator `b` and denominator `a`. Coefficients are
    /// normalized so that `a[0] == 1`.
    pub fn new(b: &[f64], a: &[f64]) -> Self {
        let a0 = a.first().copied().filter(|&v| v != 0.0).unwrap_or(1.0);
        let order = b.len().max(a.len()).max(1);

        let mut nb = vec![0.0; order];
        let mut na = vec![0.0; order];
        for (dst, &src) in nb.iter_mut().zip(b) {
            *dst = src / a0;
        }
        for (dst, &src) in na.iter_mut().zip(a) {
            *dst = src / a0;
        }
        na[0] = 1.0;

        IirFilter {
            b: nb,
            a: na,
            state: vec![0.0; order - 1],
        }
    }
}

impl Filter for IirFilter {
    // Direct Form II Transposed, same structure as the biquad
    fn process(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state.first().copied().unwrap_or(0.0);
        let last = self.state.len();
        for i in 0..last {
            let next = if i + 1 < last { self.state[i + 1] } else { 0.0 };
            self.state[i] = self.b[i + 1] * input - self.a[i + 1] * output + next;
        }
        output
    }

    fn reset(&mut self) {
        self.state.fill(0.0);
    }
}
