use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for library operations that can fail.
#[derive(Debug, Error)]
pub enum JingleError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Unknown effect '{0}'")]
    UnknownEffect(String),
}

/// Failures while decoding or encoding a PCM container.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed WAV container: {0}")]
    Container(#[from] hound::Error),
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
    #[error("unsupported sample format: IEEE float")]
    FloatSamples,
    #[error("container declares zero channels")]
    NoChannels,
    #[error("container declares a sample rate of 0 Hz")]
    ZeroSampleRate,
}

/// Failures while loading a [`RenderConfig`](crate::config::RenderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
