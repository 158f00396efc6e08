//! DSP core: offline, whole-buffer mono audio.
//!
//! Buffers flow leaf to root: the codec and resampler feed everything else,
//! oscillators and voices feed the mixer, and the renderer adds reverb and
//! finalizes a mix before it is written.

pub mod buffer;
pub mod envelope;
pub mod filter;
pub mod mixer;
pub mod noise;
pub mod oscillator;
pub mod renderer;
pub mod resample;
pub mod reverb;
pub mod voice;
pub mod wav;
