//! Renderer: turns a note arrangement into a finished effect buffer.
//!
//! Notes are mixed dry, run through a chain of feedback delays, blended back
//! with the dry signal, then finalized (edge fades, then peak normalization)
//! before the buffer is written.

use super::buffer::SampleBuffer;
use super::mixer::{Mixer, NoteEvent};
use super::reverb::{FeedbackDelay, apply_chain, dry_wet};
use super::voice::Voice;
use crate::config::RenderConfig;

/// A fixed-length phrase of notes plus the space it is played in.
#[derive(Debug, Clone, Copy)]
pub struct Arrangement<'a> {
    /// Length of the master buffer in seconds.
    pub duration: f64,
    pub notes: &'a [NoteEvent],
    /// Reverb stages, applied in order. Empty means dry output.
    pub reverb: &'a [FeedbackDelay],
    /// Share of the reverberated signal in the final blend.
    pub wet_mix: f64,
}

/// Mix `arrangement` with `voice` at `sample_rate`. The result is not
/// finalized.
pub fn render_arrangement(
    arrangement: &Arrangement<'_>,
    voice: &impl Voice,
    sample_rate: u32,
) -> SampleBuffer {
    let mut mixer = Mixer::new(arrangement.duration, sample_rate);
    mixer.place_all(arrangement.notes, voice);
    let dry = mixer.into_buffer();

    if arrangement.reverb.is_empty() {
        return dry;
    }
    let wet = apply_chain(&dry, arrangement.reverb);
    dry_wet(&dry, &wet, arrangement.wet_mix)
}

/// Apply the click-free edge fades, then normalize to the effect peak.
pub fn finalize(buffer: &mut SampleBuffer, config: &RenderConfig) {
    buffer.fade_edges(config.fade_samples());
    buffer.normalize_to(config.effect_peak);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::voice::FmVoice;

    const NOTES: [NoteEvent; 2] = [
        NoteEvent::new(261.63, 0.0, 0.5, 0.4),
        NoteEvent::new(392.0, 0.25, 0.5, 0.4),
    ];

    const ROOM: [FeedbackDelay; 1] = [FeedbackDelay {
        decay: 0.4,
        delay_ms: 120.0,
    }];

    fn energy(s: &[f64]) -> f64 {
        s.iter().map(|v| v * v).sum()
    }

    #[test]
    fn dry_arrangement_is_plain_mix() {
        let arr = Arrangement {
            duration: 1.0,
            notes: &NOTES,
            reverb: &[],
            wet_mix: 0.5,
        };
        let voice = FmVoice::marimba();
        let rendered = render_arrangement(&arr, &voice, 22050);

        let mut mixer = Mixer::new(1.0, 22050);
        mixer.place_all(&NOTES, &voice);
        assert_eq!(rendered, mixer.into_buffer());
    }

    #[test]
    fn reverb_extends_the_tail() {
        let dry = Arrangement {
            duration: 1.0,
            notes: &NOTES,
            reverb: &[],
            wet_mix: 0.5,
        };
        let wet = Arrangement {
            reverb: &ROOM,
            ..dry
        };
        let voice = FmVoice::marimba();
        let a = render_arrangement(&dry, &voice, 22050);
        let b = render_arrangement(&wet, &voice, 22050);
        assert_eq!(a.len(), b.len());

        // after both notes have decayed, the echoes carry more energy
        let tail = 22050 * 3 / 4..;
        let ea = energy(&a.samples()[tail.clone()]);
        let eb = energy(&b.samples()[tail]);
        assert!(eb > ea * 1.5, "dry tail {ea}, wet tail {eb}");
    }

    #[test]
    fn finalize_fades_and_normalizes() {
        let config = RenderConfig::default();
        let mut b = SampleBuffer::new(vec![0.5; 44100], 44100);
        finalize(&mut b, &config);
        assert_eq!(b.samples()[0], 0.0);
        assert_eq!(b.samples()[44099], 0.0);
        assert!((b.peak() - 0.9).abs() < 1e-12, "peak {}", b.peak());
    }

    #[test]
    fn finalize_leaves_silence_silent() {
        let config = RenderConfig::default();
        let mut b = SampleBuffer::silence(0.5, 44100);
        finalize(&mut b, &config);
        assert_eq!(b.peak(), 0.0);
    }
}
