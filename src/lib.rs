pub mod assembler;
pub mod composition;
pub mod config;
pub mod dsp;
pub mod error;

pub use assembler::{AssemblyReport, MixRequest, assemble};
pub use composition::{Effect, generate_all, render_effect};
pub use config::RenderConfig;
pub use dsp::buffer::SampleBuffer;
pub use dsp::mixer::{Mixer, NoteEvent};
pub use dsp::wav::ReadOutcome;
pub use error::{CodecError, ConfigError, JingleError};

use crate::dsp::noise::NoiseSource;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the jingle_core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}

/// WASM-exposed: render one named effect to a mono 16-bit WAV byte array.
/// Pass a seed for reproducible noise.
#[wasm_bindgen]
pub fn render_effect_wav(name: &str, seed: Option<u64>) -> Result<Vec<u8>, JsValue> {
    let effect: Effect = name.parse().map_err(to_js)?;
    let config = RenderConfig {
        seed,
        ..RenderConfig::default()
    };
    composition::render_effect_wav(effect, &config).map_err(to_js)
}

/// WASM-exposed: render one named effect to f32 samples for direct playback.
#[wasm_bindgen]
pub fn render_effect_samples(name: &str, seed: Option<u64>) -> Result<Vec<f32>, JsValue> {
    let effect: Effect = name.parse().map_err(to_js)?;
    let config = RenderConfig::default();
    let mut noise = NoiseSource::new(seed);
    let buffer = render_effect(effect, &config, &mut noise);
    Ok(buffer.samples().iter().map(|&s| s as f32).collect())
}

/// WASM-exposed: the note table of a phrase (`intro`, `outro`) as a JSON-like
/// array of `{ frequency, start, duration, amplitude }`.
#[wasm_bindgen]
pub fn effect_notes(name: &str) -> Result<JsValue, JsValue> {
    let effect: Effect = name.parse().map_err(to_js)?;
    serde_wasm_bindgen::to_value(effect.notes()).map_err(to_js)
}
