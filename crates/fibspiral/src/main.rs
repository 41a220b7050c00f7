//! fibspiral: render a Fibonacci spiral composition from an image file.
//!
//! Reads a source image (PNG with transparency works best), arranges
//! copies of it on eight concentric rings, and delivers the canvas as a
//! PNG file, a `data:` URL, or a JSON response envelope.
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin fibspiral -- [OPTIONS] <INPUT>
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`); logs go to stderr so
//! stdout stays clean for `--data-url` and `--json`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use fibspiral_compose::{Clock, ComposeConfig, ComposeError, ResizeFilter, RotateInterpolation};
use fibspiral_export::{GenerateResponse, encode_png, to_data_url};
use tracing_subscriber::EnvFilter;

/// Render a Fibonacci spiral composition from an image file.
#[derive(Parser)]
#[command(name = "fibspiral", version)]
struct Cli {
    /// Path to the source image (PNG, JPEG, BMP, WebP).
    input: PathBuf,

    /// Write the rendered canvas to this PNG file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Edge length of the square output canvas in pixels.
    #[arg(long, default_value_t = ComposeConfig::DEFAULT_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Filter used to scale the source to each stamp.
    #[arg(long, value_enum, default_value_t = CLI_DEFAULT_FILTER)]
    resize_filter: Filter,

    /// Interpolation used to rotate stamps.
    #[arg(long, value_enum, default_value_t = CLI_DEFAULT_ROTATION)]
    rotate_interpolation: Rotation,

    /// Full compose config as a JSON string.
    ///
    /// When provided, `--size`, `--resize-filter`, and
    /// `--rotate-interpolation` are ignored. Missing fields take their
    /// default values.
    #[arg(long)]
    config_json: Option<String>,

    /// Print the canvas as a `data:image/png;base64,...` URL on stdout.
    #[arg(long)]
    data_url: bool,

    /// Print a JSON response envelope on stdout (`success`,
    /// `image_base64`, `error`). Failures are reported the same way.
    #[arg(long)]
    json: bool,

    /// Print a per-layer diagnostics report on stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Write per-layer diagnostics as JSON to this file.
    #[arg(long, value_name = "PATH")]
    diagnostics_json: Option<PathBuf>,
}

/// Stamp resize filter selection.
#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    /// Nearest-neighbor (fastest, blocky).
    Nearest,
    /// Bilinear interpolation (fast, decent quality).
    Triangle,
    /// Bicubic Catmull-Rom (moderate, good quality).
    CatmullRom,
    /// Gaussian (moderate, smooth).
    Gaussian,
    /// Lanczos with 3 lobes (slowest, sharpest).
    Lanczos3,
}

/// Stamp rotation interpolation selection.
#[derive(Clone, Copy, ValueEnum)]
enum Rotation {
    /// Nearest-neighbor sampling.
    Nearest,
    /// Bilinear sampling.
    Bilinear,
    /// Bicubic sampling.
    Bicubic,
}

const fn filter_from_config(f: ResizeFilter) -> Filter {
    match f {
        ResizeFilter::Nearest => Filter::Nearest,
        ResizeFilter::Triangle => Filter::Triangle,
        ResizeFilter::CatmullRom => Filter::CatmullRom,
        ResizeFilter::Gaussian => Filter::Gaussian,
        ResizeFilter::Lanczos3 => Filter::Lanczos3,
    }
}

const fn rotation_from_config(r: RotateInterpolation) -> Rotation {
    match r {
        RotateInterpolation::Nearest => Rotation::Nearest,
        RotateInterpolation::Bilinear => Rotation::Bilinear,
        RotateInterpolation::Bicubic => Rotation::Bicubic,
    }
}

/// CLI defaults derived from [`ComposeConfig`] so the two cannot drift.
const CLI_DEFAULT_FILTER: Filter = filter_from_config(ComposeConfig::DEFAULT_RESIZE_FILTER);
const CLI_DEFAULT_ROTATION: Rotation =
    rotation_from_config(ComposeConfig::DEFAULT_ROTATE_INTERPOLATION);

/// Build a [`ComposeConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual parameter flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ComposeConfig, ComposeError> {
    let config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json)
            .map_err(|e| ComposeError::InvalidConfig(format!("--config-json: {e}")))?
    } else {
        ComposeConfig {
            size: cli.size,
            resize_filter: match cli.resize_filter {
                Filter::Nearest => ResizeFilter::Nearest,
                Filter::Triangle => ResizeFilter::Triangle,
                Filter::CatmullRom => ResizeFilter::CatmullRom,
                Filter::Gaussian => ResizeFilter::Gaussian,
                Filter::Lanczos3 => ResizeFilter::Lanczos3,
            },
            rotate_interpolation: match cli.rotate_interpolation {
                Rotation::Nearest => RotateInterpolation::Nearest,
                Rotation::Bilinear => RotateInterpolation::Bilinear,
                Rotation::Bicubic => RotateInterpolation::Bicubic,
            },
        }
    };
    config.validate()?;
    Ok(config)
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.output.is_none()
        && !cli.data_url
        && !cli.json
        && !cli.diagnostics
        && cli.diagnostics_json.is_none()
    {
        return Err(
            "nothing to do: pass --output, --data-url, --json, or --diagnostics".into(),
        );
    }

    let config = config_from_cli(cli)?;

    let image_bytes = std::fs::read(&cli.input)
        .map_err(|e| format!("Error reading {}: {e}", cli.input.display()))?;
    tracing::info!(
        path = %cli.input.display(),
        bytes = image_bytes.len(),
        "read source image"
    );

    let source = fibspiral_compose::decode_rgba(&image_bytes)?;
    let (canvas, diagnostics) =
        fibspiral_compose::render_with_diagnostics(&source, &config, &StdClock)?;

    if cli.diagnostics {
        eprintln!("{}", diagnostics.report());
    }
    if let Some(ref path) = cli.diagnostics_json {
        std::fs::write(path, serde_json::to_string_pretty(&diagnostics)?)
            .map_err(|e| format!("Error writing {}: {e}", path.display()))?;
    }

    let png = encode_png(&canvas)?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, &png).map_err(|e| format!("Error writing {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = png.len(), "wrote PNG");
    }

    if cli.data_url || cli.json {
        let url = to_data_url(&png);
        tracing::info!(chars = url.len(), "encoded data URL");
        if cli.json {
            println!("{}", GenerateResponse::ok(url).to_json()?);
        } else {
            println!("{url}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            if cli.json {
                match GenerateResponse::failure(&e).to_json() {
                    Ok(json) => println!("{json}"),
                    Err(json_err) => eprintln!("Error serializing response: {json_err}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}
