//! physio2fsl: convert a Siemens PULS/RESP log pair into an FSL `.physio`
//! file aligned to the run described by a BIDS JSON sidecar.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

use physlog::{convert_files, ConversionConfig};

#[derive(Parser, Debug)]
#[command(name = "physio2fsl", version, about = "Siemens physio logs → FSL physio text file")]
struct Args {
    /// Pulse log (`*_PULS.log` / `.puls`).
    #[arg(long)]
    pulse: PathBuf,

    /// Respiration log (`*_RESP.log` / `.resp`).
    #[arg(long)]
    resp: PathBuf,

    /// BIDS sidecar with `AcquisitionTime`; its stem names the output file.
    #[arg(long)]
    json: PathBuf,

    /// Repetition time in seconds.
    #[arg(long)]
    tr: f64,

    /// Number of volumes collected.
    #[arg(long)]
    number_of_volumes: usize,

    /// Write zeros in the respiration column.
    #[arg(long)]
    exclude_resp: bool,

    /// Directory for `<json stem>.physio`.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JSON file with further `ConversionConfig` fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tolerated trace/axis length difference in samples.
    #[arg(long)]
    length_tolerance: Option<usize>,
}

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
fn start_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let subscriber = Registry::default().with(
        fmt::layer()
            .without_time()
            .with_writer(std::io::stderr)
            .with_filter(filter),
    );
    set_global_default(subscriber).context("unable to set global subscriber")?;
    Ok(())
}

fn main() -> Result<()> {
    start_logging()?;
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => ConversionConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ConversionConfig::default(),
    };
    let cfg = ConversionConfig {
        repetition_period_s: args.tr,
        number_of_volumes: args.number_of_volumes,
        exclude_respiration: args.exclude_resp || base.exclude_respiration,
        length_tolerance: args.length_tolerance.unwrap_or(base.length_tolerance),
        ..base
    };

    let out = convert_files(&args.pulse, &args.resp, &args.json, &args.output_dir, &cfg)
        .with_context(|| format!("converting {} + {}", args.pulse.display(), args.resp.display()))?;
    println!("Saved FSL physio file: {}", out.display());
    Ok(())
}
