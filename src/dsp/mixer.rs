//! Mixer: sums rendered notes into a fixed-length master buffer.
//!
//! The mixer owns its buffer and only ever adds into it. Notes that start
//! past the end are dropped, notes that run past the end are cut short; the
//! buffer never grows.

use serde::{Deserialize, Serialize};

use super::buffer::SampleBuffer;
use super::voice::Voice;

/// One percussive or tonal hit on a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Pitch in Hz.
    pub frequency: f64,
    /// Offset from the start of the buffer, in seconds.
    pub start: f64,
    /// Requested length in seconds.
    pub duration: f64,
    /// Gain applied to the rendered tone.
    pub amplitude: f64,
}

impl NoteEvent {
    pub const fn new(frequency: f64, start: f64, duration: f64, amplitude: f64) -> Self {
        NoteEvent {
            frequency,
            start,
            duration,
            amplitude,
        }
    }
}

/// Additive, bounds-clamped note accumulator.
#[derive(Debug, Clone)]
pub struct Mixer {
    buffer: SampleBuffer,
}

impl Mixer {
    /// A silent master buffer of `duration` seconds.
    pub fn new(duration: f64, sample_rate: u32) -> Self {
        Mixer {
            buffer: SampleBuffer::silence(duration, sample_rate),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.buffer.duration()
    }

    /// Render `note` with `voice` and add it in at `round(start·rate)`.
    ///
    /// Returns `false` when the note starts at or after the end of the buffer
    /// and nothing was written.
    pub fn place(&mut self, note: &NoteEvent, voice: &impl Voice) -> bool {
        let total = self.buffer.duration();
        if note.start >= total {
            return false;
        }

        let render_duration = note.duration.min(total - note.start);
        let rate = self.buffer.sample_rate();
        let tone = voice.render(note.frequency, render_duration, rate);

        let offset = self.buffer.index_at(note.start);
        if let Some(target) = self.buffer.samples_mut().get_mut(offset..) {
            for (dst, s) in target.iter_mut().zip(&tone) {
                *dst += s * note.amplitude;
            }
        }
        true
    }

    /// Place every note in order with the same voice.
    pub fn place_all<'a>(
        &mut self,
        notes: impl IntoIterator<Item = &'a NoteEvent>,
        voice: &impl Voice,
    ) {
        for note in notes {
            self.place(note, voice);
        }
    }

    /// The mixed buffer, unnormalized.
    pub fn into_buffer(self) -> SampleBuffer {
        self.buffer
    }
}
