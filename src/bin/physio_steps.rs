/// physio_steps: run the conversion and write every intermediate trace to a
/// safetensors file for inspection outside Rust.
///
/// Output keys:
///   pulse_clean        [n]  I64  device-rate pulse samples after cleaning
///   resp_clean         [n]  I64  device-rate respiration samples after cleaning
///   pulse_decimated    [m]  F64  pulse on the 20 ms grid
///   pulse_axis         [m]  I64  absolute ms for pulse_decimated
///   resp_decimated     [m]  F64  respiration on the 20 ms grid
///   resp_axis          [m]  I64  absolute ms for resp_decimated
///   window             [3]  I64  acquisition, start, end (ms)
///   time, resp, trigger, pulse  [rows]  F64  the output table columns
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use physlog::{
    io::{read_channel_file, read_metadata_file},
    run_pipeline, ConversionConfig, DiagnosticsWriter,
};

#[derive(Parser, Debug)]
#[command(name = "physio_steps")]
struct Args {
    #[arg(long)]
    pulse: PathBuf,

    #[arg(long)]
    resp: PathBuf,

    #[arg(long)]
    json: PathBuf,

    /// Repetition time (s).
    #[arg(long)]
    tr: f64,

    #[arg(long)]
    number_of_volumes: usize,

    /// Output safetensors path.
    #[arg(long)]
    output: PathBuf,

    /// Decimation FIR order.
    #[arg(long, default_value_t = 160)]
    filter_order: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut cfg = ConversionConfig {
        repetition_period_s: args.tr,
        number_of_volumes: args.number_of_volumes,
        ..ConversionConfig::default()
    };
    cfg.decimation.order = args.filter_order;

    let t0 = std::time::Instant::now();
    let pulse = read_channel_file(&args.pulse)?;
    let resp = read_channel_file(&args.resp)?;
    let meta = read_metadata_file(&args.json)?;
    let run = run_pipeline(&pulse, &resp, &meta, &cfg).context("conversion failed")?;
    let ms = t0.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "TIMING total={ms:.3}ms  pulse={} resp={} samples  annotations pulse={} resp={}",
        run.pulse_clean.samples.len(),
        run.respiration_clean.samples.len(),
        run.pulse_clean.annotation_runs,
        run.respiration_clean.annotation_runs,
    );

    let mut w = DiagnosticsWriter::new();
    w.add_i64("pulse_clean", &run.pulse_clean.samples);
    w.add_i64("resp_clean", &run.respiration_clean.samples);
    w.add_f64("pulse_decimated", &run.pulse.values);
    w.add_i64("pulse_axis", &run.pulse.axis);
    w.add_f64("resp_decimated", &run.respiration.values);
    w.add_i64("resp_axis", &run.respiration.axis);
    w.add_i64(
        "window",
        &[run.window.acquisition_ms, run.window.start_ms, run.window.end_ms],
    );
    w.add_f64("time", &run.table.time_s);
    w.add_f64("resp", &run.table.respiration);
    w.add_f64("trigger", &run.table.trigger);
    w.add_f64("pulse", &run.table.pulse);
    w.write(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    eprintln!("Written → {} ({} tensors)", args.output.display(), w.len());
    Ok(())
}
