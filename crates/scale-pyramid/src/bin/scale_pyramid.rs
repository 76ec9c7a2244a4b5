use std::path::PathBuf;

use clap::Parser;
use scale_pyramid::load::{load_rgba, to_patch};
use scale_pyramid::{PyramidBuilder, PyramidConfig, PyramidReport, ZeroDescriptors};

#[cfg(not(feature = "tracing"))]
use log::info;
#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use scale_pyramid::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use scale_pyramid::core::{init_with_level, parse_level};

#[derive(Parser, Debug)]
#[command(name = "scale-pyramid")]
#[command(about = "Build a multi-scale feature pyramid for an image and report its levels")]
struct Cli {
    /// Input image; overrides `image_path` from the config.
    image: Option<PathBuf>,
    /// JSON run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Square patch size the input is resampled to first (0 keeps the native size).
    #[arg(long)]
    patch: Option<usize>,
    #[arg(long)]
    intervals: Option<usize>,
    #[arg(long)]
    octaves: Option<usize>,
    #[arg(long)]
    cell_size: Option<usize>,
    /// Write the JSON report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Log level; `RUST_LOG` takes precedence when built with `tracing`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    init_with_level(parse_level(&cli.log_level))?;
    #[cfg(feature = "tracing")]
    init_tracing(false, &cli.log_level);

    run(cli)
}

fn resolve_config(cli: &Cli) -> Result<PyramidConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &cli.config {
        Some(path) => PyramidConfig::load_json(path)?,
        None => PyramidConfig::default(),
    };
    if let Some(image) = &cli.image {
        cfg.image_path = Some(image.to_string_lossy().into_owned());
    }
    if let Some(patch) = cli.patch {
        cfg.patch_size = (patch > 0).then_some(patch);
    }
    if let Some(n) = cli.intervals {
        cfg.params.intervals_per_octave = n;
    }
    if cli.octaves.is_some() {
        cfg.params.max_octaves = cli.octaves;
    }
    if let Some(cell) = cli.cell_size {
        cfg.params.cell_size = cell;
    }
    if let Some(out) = &cli.output {
        cfg.output_path = Some(out.to_string_lossy().into_owned());
    }
    Ok(cfg)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = resolve_config(&cli)?;
    let Some(image_path) = cfg.image_path.clone() else {
        return Err("no input image given (positional argument or `image_path` in config)".into());
    };

    let mut image = load_rgba(&image_path)?;
    info!(
        "loaded {} ({}x{}, {} channels)",
        image_path,
        image.height(),
        image.width(),
        image.channels()
    );
    if let Some(size) = cfg.patch_size {
        image = to_patch(&image, size)?;
    }

    let builder = PyramidBuilder::new(cfg.params.clone())?;
    let pyramid = builder.build(image, &mut ZeroDescriptors)?;

    let report = PyramidReport {
        image_path,
        patch_size: cfg.patch_size,
        params: cfg.params.clone(),
        summary: pyramid.summary(),
        timings_ms: pyramid.timings.clone(),
    };

    match cfg.output_path() {
        Some(path) => {
            report.write_json(&path)?;
            info!("wrote report JSON to {}", path.display());
        }
        None => println!("{}", report.to_json()?),
    }
    Ok(())
}
