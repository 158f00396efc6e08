//! Render configuration shared by the effect generator and the track assembler.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dsp::buffer::sample_count;
use crate::error::ConfigError;

/// Rate used for generated effects and the assembled track.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Peak level generated effects are normalized to.
pub const EFFECT_PEAK: f64 = 0.9;
/// Peak level the assembled narration track is normalized to.
pub const TRACK_PEAK: f64 = 0.95;
/// Edge fade applied to every generated effect.
pub const EDGE_FADE_MS: f64 = 10.0;
/// Silence inserted between intro, speech and outro.
pub const SEGMENT_GAP_SECONDS: f64 = 0.5;

/// Tunables for rendering and assembly. Every field has a default, so a JSON
/// file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub sample_rate: u32,
    pub effect_peak: f64,
    pub track_peak: f64,
    pub fade_ms: f64,
    pub gap_seconds: f64,
    /// Rate reported for inputs that could not be read.
    pub fallback_sample_rate: u32,
    /// Noise seed. `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            effect_peak: EFFECT_PEAK,
            track_peak: TRACK_PEAK,
            fade_ms: EDGE_FADE_MS,
            gap_seconds: SEGMENT_GAP_SECONDS,
            fallback_sample_rate: DEFAULT_SAMPLE_RATE,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| match e {
            ConfigError::Syntax(source) => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against the range the pipeline can honor.
    ///
    /// Rates must be positive, peaks must lie in `(0, 1]`, and the gap and
    /// fade lengths must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| ConfigError::Invalid { field, reason };

        for (field, rate) in [
            ("sample_rate", self.sample_rate),
            ("fallback_sample_rate", self.fallback_sample_rate),
        ] {
            if rate == 0 {
                return Err(invalid(field, "must be greater than 0".to_string()));
            }
        }
        for (field, peak) in [
            ("effect_peak", self.effect_peak),
            ("track_peak", self.track_peak),
        ] {
            if !(peak > 0.0 && peak <= 1.0) {
                return Err(invalid(field, format!("must be in (0, 1], got {peak}")));
            }
        }
        for (field, length) in [("fade_ms", self.fade_ms), ("gap_seconds", self.gap_seconds)] {
            if !(length.is_finite() && length >= 0.0) {
                return Err(invalid(field, format!("must be >= 0, got {length}")));
            }
        }
        Ok(())
    }

    /// Load `path` if given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Edge fade length in samples at the render rate.
    pub fn fade_samples(&self) -> usize {
        sample_count(self.fade_ms / 1000.0, self.sample_rate)
    }
}
