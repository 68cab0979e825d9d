use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rgb_dither::{dither_in_place, DEFAULT_LEVELS};
use stipple::codec;

#[derive(Parser)]
#[command(name = "stipple")]
#[command(about = "Floyd-Steinberg error-diffusion dithering for raster images")]
struct Cli {
    /// Input image (PNG, JPEG, BMP or GIF)
    input: PathBuf,

    /// Quantization levels per channel; lower is harsher
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_LEVELS,
        value_parser = clap::value_parser!(u16).range(2..),
    )]
    levels: u16,

    /// Output path (defaults to `<input-stem>-dithered.png` next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stipple=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let output = cli
        .output
        .unwrap_or_else(|| codec::default_output_path(&cli.input));

    tracing::info!(
        input = %cli.input.display(),
        levels = cli.levels,
        "dithering image"
    );

    let mut buffer = codec::load_rgb(&cli.input).with_context(|| {
        format!(
            "cannot load {} (supported formats: png, jpeg, bmp, gif)",
            cli.input.display()
        )
    })?;
    dither_in_place(&mut buffer, cli.levels)?;
    codec::save_rgb(&output, &buffer)
        .with_context(|| format!("cannot write {}", output.display()))?;

    tracing::info!(output = %output.display(), "wrote dithered image");

    Ok(())
}
