//! jingle-sfx - render the jingle and UI sound effects to WAV files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jingle_core::{Effect, RenderConfig, generate_all};

#[derive(Debug, Parser)]
#[command(name = "jingle-sfx")]
#[command(about = "Generate intro, outro, success, error and swoosh effects")]
#[command(version)]
struct Cli {
    /// Directory the WAV files are written to
    #[arg(short, long, default_value = "public/audio")]
    output_dir: PathBuf,

    /// JSON render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Noise seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Only render these effects (repeatable)
    #[arg(long = "only", value_name = "EFFECT")]
    only: Vec<Effect>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = RenderConfig::load_or_default(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let effects = if cli.only.is_empty() {
        Effect::ALL.to_vec()
    } else {
        cli.only
    };

    tracing::info!(
        "Generating {} effect(s) into {}",
        effects.len(),
        cli.output_dir.display()
    );
    let written = generate_all(&cli.output_dir, &config, &effects)
        .with_context(|| format!("failed to write effects to {}", cli.output_dir.display()))?;
    tracing::info!("Done, {} file(s) written", written.len());

    Ok(())
}
