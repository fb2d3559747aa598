//! # physlog — Siemens physiological logs → FSL physio files
//!
//! `physlog` turns the pulse and respiration logs written by a Siemens
//! scanner's physiological logger into the four-column text file expected by
//! FSL's physiological noise modelling (PNM), aligned to the imaging run
//! described by a BIDS JSON sidecar.
//!
//! ## Pipeline overview
//!
//! ```text
//! run_PULS.log / run_RESP.log                     run_bold.json
//!   │                                                 │
//!   ├─ siemens::read_log         tokens + LogStart/StopMDHTime
//!   ├─ siemens::locate_marker    skip to 1st (pulse) / 5th (resp) 6002
//!   ├─ siemens::filter_annotations  drop 5002 … 6002 runs
//!   ├─ siemens::repair_spikes    interior 5000 → mean of neighbours
//!   ├─ timebase::build_channel   20 ms axis, FIR lowpass, ↓8
//!   │                                                 │
//!   │                      metadata::acquisition_time_ms
//!   │                                                 │
//!   ├─ align::extract_segment    [acq − TR, acq + N·TR] by exact lookup
//!   ├─ trigger::synthesize_trigger  10 % TR pulse per volume
//!   └─ table::AlignedTable        time | resp | trigger | pulse
//!        │
//!        └─→ io::write_physio     <stem>.physio, tab-separated, %.9f
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use physlog::{convert_files, ConversionConfig};
//! use std::path::Path;
//!
//! let cfg = ConversionConfig {
//!     repetition_period_s: 2.0,
//!     number_of_volumes:   300,
//!     ..ConversionConfig::default()
//! };
//! let out = convert_files(
//!     Path::new("run_PULS.log"),
//!     Path::new("run_RESP.log"),
//!     Path::new("run_bold.json"),
//!     Path::new("."),
//!     &cfg,
//! ).unwrap();
//! println!("wrote {}", out.display());
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod metadata;
pub mod siemens;
pub mod table;
pub mod timebase;
pub mod trigger;

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

// ── Crate-root re-exports ─────────────────────────────────────────────────

pub use align::{extract_segment, AcquisitionWindow};
pub use config::{ChannelKind, ConversionConfig, DecimationConfig, GRID_STEP_MS};
pub use error::{PhysioError, Result};
pub use io::{physio_path, read_channel_file, read_metadata_file, write_physio, DiagnosticsWriter};
pub use metadata::{acquisition_time_ms, parse_clock_time_ms};
pub use siemens::{clean_channel, CleanTrace};
pub use table::{relative_time_axis, AlignedTable};
pub use timebase::{build_channel, decimate, round_to_step, time_axis, ChannelTrace};
pub use trigger::{synthesize_trigger, trigger_onsets};

/// Every intermediate product of one conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub pulse_clean: CleanTrace,
    pub respiration_clean: CleanTrace,
    pub pulse: ChannelTrace,
    pub respiration: ChannelTrace,
    pub window: AcquisitionWindow,
    pub table: AlignedTable,
}

/// Run the full pipeline on in-memory inputs, keeping the intermediates.
///
/// Scan parameters and the acquisition time are checked before either log
/// is parsed, so a bad sidecar fails fast.
///
/// # Errors
///
/// Any [`PhysioError`]; nothing is written to disk.
pub fn run_pipeline(
    pulse_text: &str,
    respiration_text: &str,
    metadata: &Value,
    cfg: &ConversionConfig,
) -> Result<Conversion> {
    cfg.validate()?;
    let acquisition = acquisition_time_ms(metadata)?;
    let window = AcquisitionWindow::new(acquisition, cfg)?;

    let pulse_clean = clean_channel(pulse_text, ChannelKind::Pulse)?;
    let respiration_clean = clean_channel(respiration_text, ChannelKind::Respiration)?;
    let pulse = build_channel(&pulse_clean, cfg)?;
    let respiration = build_channel(&respiration_clean, cfg)?;

    let pulse_col = extract_segment(&pulse, &window)?;
    let mut resp_col = extract_segment(&respiration, &window)?;
    if cfg.exclude_respiration {
        resp_col.fill(0.0);
    }

    let trigger_col = synthesize_trigger(
        &window.axis(),
        &trigger_onsets(&window),
        cfg.trigger_width_samples(),
    );
    let table = AlignedTable::assemble(&window, resp_col, trigger_col, pulse_col)?;

    info!(
        acquisition_ms = acquisition,
        window_start_ms = window.start_ms,
        window_end_ms = window.end_ms,
        rows = table.n_rows(),
        "conversion complete"
    );

    Ok(Conversion {
        pulse_clean,
        respiration_clean,
        pulse,
        respiration,
        window,
        table,
    })
}

/// Convert in-memory inputs to the aligned output table.
///
/// # Examples
///
/// ```
/// use physlog::{convert, ConversionConfig};
/// use serde_json::json;
///
/// // 0 … 4000 ms at 2.5 ms per sample, constant signal.
/// let body: Vec<String> = std::iter::repeat("2000".to_string()).take(201 * 8).collect();
/// let log = |extra: &str| format!(
///     "{extra}6002 {} 5003\nLogStartMDHTime: 0\nLogStopMDHTime: 4000\n",
///     body.join(" ")
/// );
/// let pulse = log("");
/// let resp = log("1 6002 2 6002 3 6002 4 6002 ");
///
/// let cfg = ConversionConfig {
///     repetition_period_s: 1.0,
///     number_of_volumes: 2,
///     ..ConversionConfig::default()
/// };
/// let table = convert(&pulse, &resp, &json!({"AcquisitionTime": "00:00:01"}), &cfg).unwrap();
/// assert_eq!(table.n_rows(), 151);
/// ```
pub fn convert(
    pulse_text: &str,
    respiration_text: &str,
    metadata: &Value,
    cfg: &ConversionConfig,
) -> Result<AlignedTable> {
    Ok(run_pipeline(pulse_text, respiration_text, metadata, cfg)?.table)
}

/// Read the three input files, convert, and write `<json stem>.physio` into
/// `out_dir`. Returns the path written.
///
/// The output file is created only after the whole table is assembled.
pub fn convert_files(
    pulse_path: &Path,
    respiration_path: &Path,
    metadata_path: &Path,
    out_dir: &Path,
    cfg: &ConversionConfig,
) -> Result<PathBuf> {
    let metadata = read_metadata_file(metadata_path)?;
    let pulse = read_channel_file(pulse_path)?;
    let respiration = read_channel_file(respiration_path)?;

    let table = convert(&pulse, &respiration, &metadata, cfg)?;

    let out = physio_path(metadata_path, out_dir);
    write_physio(&table, &out)?;
    info!(path = %out.display(), "physio file written");
    Ok(out)
}
