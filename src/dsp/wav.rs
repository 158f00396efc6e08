//! WAV codec: PCM containers to and from [`SampleBuffer`]s.
//!
//! Reading accepts 8-bit unsigned, 16-bit and 32-bit signed integer PCM with
//! any channel count and downmixes to mono by averaging each frame. Writing
//! always produces mono 16-bit PCM.
//!
//! Reads never fail outward: [`read`] returns a [`ReadOutcome`] that either
//! carries the decoded buffer or records why the input is missing. Batch
//! callers treat a missing input as silence and keep going.

use std::fmt;
use std::io::{Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{info, warn};

use super::buffer::SampleBuffer;
use crate::error::CodecError;

/// Scale applied when quantizing to 16-bit PCM.
const PCM16_WRITE_SCALE: f64 = 32767.0;

/// An input that could not be decoded.
#[derive(Debug)]
pub struct MissingInput {
    pub path: PathBuf,
    pub reason: CodecError,
    /// Rate reported in place of the unknown real one.
    pub fallback_rate: u32,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Result of reading a PCM container.
#[derive(Debug)]
pub enum ReadOutcome {
    Loaded(SampleBuffer),
    Missing(MissingInput),
}

impl ReadOutcome {
    pub fn is_missing(&self) -> bool {
        matches!(self, ReadOutcome::Missing(_))
    }

    pub fn sample_rate(&self) -> u32 {
        match self {
            ReadOutcome::Loaded(b) => b.sample_rate(),
            ReadOutcome::Missing(m) => m.fallback_rate,
        }
    }

    /// The decoded buffer, or an empty one at the fallback rate.
    pub fn into_buffer(self) -> SampleBuffer {
        match self {
            ReadOutcome::Loaded(b) => b,
            ReadOutcome::Missing(m) => SampleBuffer::empty(m.fallback_rate),
        }
    }
}

/// Read a WAV file, degrading to [`ReadOutcome::Missing`] on any failure.
pub fn read(path: &Path, fallback_rate: u32) -> ReadOutcome {
    match try_read(path) {
        Ok(buffer) => {
            info!(
                "Read {}: {:.1}s @ {}Hz",
                path.display(),
                buffer.duration(),
                buffer.sample_rate()
            );
            ReadOutcome::Loaded(buffer)
        }
        Err(reason) => {
            warn!("Cannot read {}: {reason}", path.display());
            ReadOutcome::Missing(MissingInput {
                path: path.to_path_buf(),
                reason,
                fallback_rate,
            })
        }
    }
}

/// Read a WAV file, reporting failures to the caller.
pub fn try_read(path: &Path) -> Result<SampleBuffer, CodecError> {
    if !path.exists() {
        return Err(CodecError::NotFound(path.to_path_buf()));
    }
    let reader = WavReader::open(path)?;
    decode(reader)
}

/// Decode an in-memory WAV container.
pub fn decode_bytes(bytes: &[u8]) -> Result<SampleBuffer, CodecError> {
    let reader = WavReader::new(Cursor::new(bytes))?;
    decode(reader)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<SampleBuffer, CodecError> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(CodecError::NoChannels);
    }
    // hound accepts a zero rate in the fmt chunk
    if spec.sample_rate == 0 {
        return Err(CodecError::ZeroSampleRate);
    }
    if spec.sample_format == SampleFormat::Float {
        return Err(CodecError::FloatSamples);
    }

    // hound hands 8-bit data back already re-centered as i8, i.e. v - 128
    let interleaved: Vec<f64> = match spec.bits_per_sample {
        8 => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f64 / 128.0))
            .collect::<Result<_, _>>()?,
        16 => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f64 / 32768.0))
            .collect::<Result<_, _>>()?,
        32 => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f64 / 2_147_483_648.0))
            .collect::<Result<_, _>>()?,
        other => return Err(CodecError::UnsupportedBitDepth(other)),
    };

    Ok(SampleBuffer::new(
        downmix(interleaved, spec.channels as usize),
        spec.sample_rate,
    ))
}

/// Average interleaved frames down to one channel.
fn downmix(interleaved: Vec<f64>, channels: usize) -> Vec<f64> {
    if channels == 1 {
        return interleaved;
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Quantize one sample: scale by 32767 and truncate toward zero.
///
/// Inputs are expected in `[-1, 1]`; anything outside saturates.
#[inline]
pub fn to_pcm_i16(sample: f64) -> i16 {
    (sample * PCM16_WRITE_SCALE) as i16
}

fn mono16_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn write_samples<W: Write + Seek>(
    mut writer: WavWriter<W>,
    buffer: &SampleBuffer,
) -> Result<(), CodecError> {
    for &s in buffer.samples() {
        writer.write_sample(to_pcm_i16(s))?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write `buffer` as a mono 16-bit WAV file. No normalization is applied.
pub fn write(path: &Path, buffer: &SampleBuffer) -> Result<(), CodecError> {
    let writer = WavWriter::create(path, mono16_spec(buffer.sample_rate()))?;
    write_samples(writer, buffer)
}

/// Encode `buffer` as mono 16-bit WAV bytes.
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + buffer.len() * 2));
    let writer = WavWriter::new(&mut cursor, mono16_spec(buffer.sample_rate()))?;
    write_samples(writer, buffer)?;
    Ok(cursor.into_inner())
}
