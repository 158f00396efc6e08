//! Sound-effect recipes: the jingle phrases and the UI cues.
//!
//! Intro and outro are marimba phrases stored as static note tables and
//! rendered through the mixer with a two-stage reverb. Success, error and
//! swoosh are whole-buffer effects built from oscillators, noise and
//! filters. Every effect is finalized the same way before it is written.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::dsp::buffer::SampleBuffer;
use crate::dsp::envelope::{Envelope, fade_out_tail};
use crate::dsp::filter::{Filter, design_lowpass};
use crate::dsp::mixer::{Mixer, NoteEvent};
use crate::dsp::noise::{NoiseColor, NoiseSource};
use crate::dsp::oscillator::{Waveform, swept};
use crate::dsp::renderer::{Arrangement, finalize, render_arrangement};
use crate::dsp::reverb::FeedbackDelay;
use crate::dsp::voice::{FmVoice, SineVoice};
use crate::dsp::wav;
use crate::error::{CodecError, JingleError};

/// Length of the intro and outro phrases.
pub const PHRASE_SECONDS: f64 = 4.0;
/// Default length of a marimba hit.
pub const HIT_DURATION: f64 = 0.8;
/// Default gain of a marimba hit.
pub const HIT_AMPLITUDE: f64 = 0.4;
/// Dry/wet balance of the phrase reverb.
pub const PHRASE_WET_MIX: f64 = 0.5;

const fn hit(frequency: f64, start: f64) -> NoteEvent {
    NoteEvent::new(frequency, start, HIT_DURATION, HIT_AMPLITUDE)
}

const fn held(frequency: f64, start: f64, duration: f64) -> NoteEvent {
    NoteEvent::new(frequency, start, duration, HIT_AMPLITUDE)
}

/// C major montuno: bass on C then G, chord tones answering on the off-beats.
pub static INTRO_NOTES: [NoteEvent; 9] = [
    held(130.81, 0.0, 1.0),
    held(196.00, 1.5, 1.0),
    hit(261.63, 0.0),
    hit(329.63, 0.25),
    hit(392.00, 0.25),
    hit(523.25, 0.75),
    hit(493.88, 0.75),
    hit(392.00, 1.25),
    hit(329.63, 1.25),
];

/// G7 arpeggio resolving to a sustained C major chord at 1.25 s.
pub static OUTRO_NOTES: [NoteEvent; 10] = [
    held(196.00, 0.0, 1.0),
    hit(392.00, 0.0),
    hit(493.88, 0.25),
    hit(587.33, 0.5),
    hit(698.46, 0.75),
    held(130.81, 1.25, 2.5),
    held(261.63, 1.25, 2.5),
    held(329.63, 1.25, 2.5),
    held(392.00, 1.25, 2.5),
    held(523.25, 1.25, 2.5),
];

pub const INTRO_REVERB: [FeedbackDelay; 2] = [
    FeedbackDelay {
        decay: 0.4,
        delay_ms: 120.0,
    },
    FeedbackDelay {
        decay: 0.3,
        delay_ms: 250.0,
    },
];

/// Same early echo as the intro with a longer second tap.
pub const OUTRO_REVERB: [FeedbackDelay; 2] = [
    FeedbackDelay {
        decay: 0.4,
        delay_ms: 120.0,
    },
    FeedbackDelay {
        decay: 0.3,
        delay_ms: 300.0,
    },
];

/// The effects this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Intro,
    Outro,
    Success,
    Error,
    Swoosh,
}

impl Effect {
    pub const ALL: [Effect; 5] = [
        Effect::Intro,
        Effect::Outro,
        Effect::Success,
        Effect::Error,
        Effect::Swoosh,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Effect::Intro => "intro",
            Effect::Outro => "outro",
            Effect::Success => "success",
            Effect::Error => "error",
            Effect::Swoosh => "swoosh",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.wav", self.name())
    }

    /// The note table behind a phrase. Whole-buffer effects have none.
    pub fn notes(self) -> &'static [NoteEvent] {
        match self {
            Effect::Intro => &INTRO_NOTES,
            Effect::Outro => &OUTRO_NOTES,
            Effect::Success | Effect::Error | Effect::Swoosh => &[],
        }
    }

    /// Arrangement for the note-based phrases.
    pub fn arrangement(self) -> Option<Arrangement<'static>> {
        match self {
            Effect::Intro => Some(phrase(&INTRO_NOTES, &INTRO_REVERB)),
            Effect::Outro => Some(phrase(&OUTRO_NOTES, &OUTRO_REVERB)),
            Effect::Success | Effect::Error | Effect::Swoosh => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = JingleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let name = name.strip_suffix(".wav").unwrap_or(&name);
        Effect::ALL
            .into_iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| JingleError::UnknownEffect(s.to_string()))
    }
}

/// A four-second marimba phrase in the reverberant room.
fn phrase(notes: &'static [NoteEvent], reverb: &'static [FeedbackDelay]) -> Arrangement<'static> {
    Arrangement {
        duration: PHRASE_SECONDS,
        notes,
        reverb,
        wet_mix: PHRASE_WET_MIX,
    }
}

/// Two-note "ding" (C6 + E6) with a quicker 2093 Hz sparkle on top.
fn success_chime(sample_rate: u32) -> SampleBuffer {
    const DURATION: f64 = 1.0;
    let body = SineVoice::new(4.0);
    let sparkle = SineVoice::new(10.0);

    let mut mixer = Mixer::new(DURATION, sample_rate);
    mixer.place(&NoteEvent::new(1046.50, 0.0, DURATION, 1.0), &body);
    mixer.place(&NoteEvent::new(1318.51, 0.0, DURATION, 1.0), &body);
    mixer.place(&NoteEvent::new(2093.00, 0.0, DURATION, 0.5), &sparkle);
    mixer.into_buffer()
}

/// Falling sawtooth buzz, low-passed and faded out.
fn error_buzz(sample_rate: u32) -> SampleBuffer {
    const DURATION: f64 = 0.6;
    let mut saw = SampleBuffer::new(
        swept(Waveform::Sawtooth, 150.0, 50.0, DURATION, sample_rate),
        sample_rate,
    );
    saw.scale(0.8);

    let mut buzz = design_lowpass(2, 500.0, sample_rate).apply(&saw);
    fade_out_tail(&mut buzz, 0.1);
    buzz
}

/// Low-passed white noise under a gaussian swell peaking at 0.2 s.
fn swoosh(sample_rate: u32, noise: &mut NoiseSource) -> SampleBuffer {
    let white = noise.generate(1.0, NoiseColor::White, sample_rate);
    let mut air = design_lowpass(4, 1200.0, sample_rate).apply(&white);
    Envelope::Gaussian {
        center: 0.2,
        sharpness: 3.0,
    }
    .apply(&mut air);
    air
}

/// Render `effect` at the configured rate and finalize it.
pub fn render_effect(effect: Effect, config: &RenderConfig, noise: &mut NoiseSource) -> SampleBuffer {
    let rate = config.sample_rate;
    let mut buffer = match effect {
        Effect::Intro => render_arrangement(
            &phrase(&INTRO_NOTES, &INTRO_REVERB),
            &FmVoice::marimba(),
            rate,
        ),
        Effect::Outro => render_arrangement(
            &phrase(&OUTRO_NOTES, &OUTRO_REVERB),
            &FmVoice::marimba(),
            rate,
        ),
        Effect::Success => success_chime(rate),
        Effect::Error => error_buzz(rate),
        Effect::Swoosh => swoosh(rate, noise),
    };
    finalize(&mut buffer, config);
    debug!(
        "Rendered {effect}: {} samples, peak {:.3}",
        buffer.len(),
        buffer.peak()
    );
    buffer
}

/// Render `effect` to WAV bytes in memory.
pub fn render_effect_wav(effect: Effect, config: &RenderConfig) -> Result<Vec<u8>, CodecError> {
    let mut noise = NoiseSource::new(config.seed);
    wav::encode_wav(&render_effect(effect, config, &mut noise))
}

/// Render `effect` and write it as `<dir>/<name>.wav`.
pub fn generate(
    effect: Effect,
    dir: &Path,
    config: &RenderConfig,
    noise: &mut NoiseSource,
) -> Result<PathBuf, CodecError> {
    let buffer = render_effect(effect, config, noise);
    let path = dir.join(effect.file_name());
    wav::write(&path, &buffer)?;
    info!("Created {}", effect.file_name());
    Ok(path)
}

/// Write each of `effects` into `dir`, creating the directory if needed.
///
/// One noise source is shared across the batch, so a fixed seed reproduces
/// the whole set.
pub fn generate_all(
    dir: &Path,
    config: &RenderConfig,
    effects: &[Effect],
) -> Result<Vec<PathBuf>, JingleError> {
    fs::create_dir_all(dir).map_err(CodecError::from)?;
    let mut noise = NoiseSource::new(config.seed);
    effects
        .iter()
        .map(|&effect| generate(effect, dir, config, &mut noise).map_err(JingleError::from))
        .collect()
}
