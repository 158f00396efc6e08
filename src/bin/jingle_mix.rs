//! jingle-mix - join intro, speech and outro into one narration track.
//!
//! Unreadable inputs become silence; the output is always written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use jingle_core::{MixRequest, RenderConfig, assemble};

#[derive(Debug, Parser)]
#[command(name = "jingle-mix")]
#[command(about = "Concatenate intro, speech and outro with gaps and normalize")]
#[command(version)]
struct Cli {
    /// Intro WAV file
    intro: PathBuf,
    /// Speech WAV file
    speech: PathBuf,
    /// Outro WAV file
    outro: PathBuf,
    /// Output WAV file
    output: PathBuf,

    /// JSON render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
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
    let config = RenderConfig::load_or_default(cli.config.as_deref())?;

    let request = MixRequest {
        intro: cli.intro,
        speech: cli.speech,
        outro: cli.outro,
        output: cli.output,
    };
    let report = assemble(&request, &config)
        .with_context(|| format!("failed to write {}", request.output.display()))?;

    if !report.missing.is_empty() {
        tracing::warn!("{} input(s) were replaced by silence", report.missing.len());
    }
    Ok(())
}
