//! Track assembly: intro, speech and outro joined into one narration file.
//!
//! Inputs that cannot be read become silence and the track is still written.
//! Each segment is resampled to the target rate, the three are joined with
//! gaps of silence, and the result is normalized once as a whole.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RenderConfig;
use crate::dsp::buffer::SampleBuffer;
use crate::dsp::resample::resample;
use crate::dsp::wav::{self, ReadOutcome};
use crate::error::CodecError;

/// Paths for one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRequest {
    pub intro: PathBuf,
    pub speech: PathBuf,
    pub outro: PathBuf,
    pub output: PathBuf,
}

/// What [`assemble`] wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyReport {
    pub output: PathBuf,
    pub sample_rate: u32,
    pub samples: usize,
    /// Inputs that degraded to silence.
    pub missing: Vec<PathBuf>,
}

impl AssemblyReport {
    pub fn duration(&self) -> f64 {
        self.samples as f64 / self.sample_rate as f64
    }
}

/// Join `[intro, gap, speech, gap, outro]` at the configured rate and
/// normalize to the track peak. Edge fades are not applied here.
pub fn mix(
    intro: &SampleBuffer,
    speech: &SampleBuffer,
    outro: &SampleBuffer,
    config: &RenderConfig,
) -> SampleBuffer {
    let rate = config.sample_rate;
    let intro = resample(intro, rate);
    let speech = resample(speech, rate);
    let outro = resample(outro, rate);
    let gap = SampleBuffer::silence(config.gap_seconds, rate);

    let mut track = SampleBuffer::concat(&[&intro, &gap, &speech, &gap, &outro], rate);
    track.normalize_to(config.track_peak);
    track
}

fn load(path: &Path, config: &RenderConfig, missing: &mut Vec<PathBuf>) -> SampleBuffer {
    let outcome = wav::read(path, config.fallback_sample_rate);
    if let ReadOutcome::Missing(m) = &outcome {
        missing.push(m.path.clone());
    }
    outcome.into_buffer()
}

/// Read the three segments, mix them and write the result.
///
/// Only the final write can fail.
pub fn assemble(request: &MixRequest, config: &RenderConfig) -> Result<AssemblyReport, CodecError> {
    let mut missing = Vec::new();
    let intro = load(&request.intro, config, &mut missing);
    let speech = load(&request.speech, config, &mut missing);
    let outro = load(&request.outro, config, &mut missing);

    if speech.is_empty() {
        warn!(
            "Speech segment {} is empty, the track will only carry the intro and outro",
            request.speech.display()
        );
    }

    let track = mix(&intro, &speech, &outro, config);
    wav::write(&request.output, &track)?;

    let report = AssemblyReport {
        output: request.output.clone(),
        sample_rate: track.sample_rate(),
        samples: track.len(),
        missing,
    };
    info!(
        "Wrote {}: {:.1}s @ {}Hz",
        report.output.display(),
        report.duration(),
        report.sample_rate
    );
    Ok(report)
}
