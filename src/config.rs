//! Conversion configuration.
//!
//! [`ConversionConfig`] holds every tunable parameter of the conversion.
//! The scan parameters (`repetition_period_s`, `number_of_volumes`) have no
//! meaningful default and must be set by the caller; everything else defaults
//! to the behaviour of the reference FSL workflow.
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PhysioError, Result};

/// Physiological channel recorded by the scanner's logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Finger pulse oximeter (`.puls` / `_PULS.log`).
    Pulse,
    /// Respiratory bellows (`.resp` / `_RESP.log`).
    Respiration,
}

impl ChannelKind {
    /// Which occurrence (1-based) of the data-start marker precedes the samples.
    ///
    /// The respiration log carries four extra parameter blocks terminated by
    /// the same marker, so its samples start after the 5th one.
    pub const fn data_start_occurrence(self) -> usize {
        match self {
            ChannelKind::Pulse => PULSE_DATA_START_OCCURRENCE,
            ChannelKind::Respiration => RESP_DATA_START_OCCURRENCE,
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Pulse => f.write_str("pulse"),
            ChannelKind::Respiration => f.write_str("respiration"),
        }
    }
}

pub const PULSE_DATA_START_OCCURRENCE: usize = 1;
pub const RESP_DATA_START_OCCURRENCE: usize = 5;

/// Output grid step in milliseconds (50 Hz).
pub const GRID_STEP_MS: i64 = 20;

/// Anti-aliasing decimation parameters.
///
/// The filter is a linear-phase Hamming-windowed sinc lowpass applied with
/// zero phase before every `factor`-th sample is kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DecimationConfig {
    /// Integer downsampling factor from the device rate to the 20 ms grid.
    ///
    /// Default: `8` (400 Hz → 50 Hz).
    pub factor: usize,

    /// FIR order (taps − 1). Must be even so the filter has a centre tap.
    ///
    /// Default: `160` (161 taps, i.e. `20 ×` the default factor).
    pub order: usize,

    /// Cutoff as a fraction of the *output* Nyquist frequency.
    ///
    /// `1.0` places the −6 dB point exactly at the new Nyquist.
    ///
    /// Default: `1.0`.
    pub cutoff: f64,
}

impl Default for DecimationConfig {
    fn default() -> Self {
        Self {
            factor: 8,
            order: 160,
            cutoff: 1.0,
        }
    }
}

impl DecimationConfig {
    /// Number of filter taps (`order + 1`).
    pub fn n_taps(&self) -> usize {
        self.order + 1
    }
}

/// Configuration for a single conversion.
///
/// All fields are `pub`, so construct one with struct-update syntax:
///
/// ```
/// use physlog::ConversionConfig;
///
/// let cfg = ConversionConfig {
///     repetition_period_s: 2.0,
///     number_of_volumes:   5,
///     ..ConversionConfig::default()
/// };
/// assert_eq!(cfg.output_rows(), 601);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Repetition time in seconds. Must be positive and a whole number of
    /// milliseconds.
    pub repetition_period_s: f64,

    /// Number of volumes acquired (excluding dummy scans).
    pub number_of_volumes: usize,

    /// Decimation from the device rate to the 20 ms grid.
    pub decimation: DecimationConfig,

    /// Largest tolerated difference, in samples, between a decimated trace
    /// and its header-derived time axis. Both are truncated to the shorter
    /// length when within tolerance.
    ///
    /// Default: `0` (lengths must match exactly).
    pub length_tolerance: usize,

    /// Write zeros instead of the respiratory trace.
    ///
    /// Default: `false`.
    pub exclude_respiration: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            repetition_period_s: 0.0,
            number_of_volumes: 0,
            decimation: DecimationConfig::default(),
            length_tolerance: 0,
            exclude_respiration: false,
        }
    }
}

impl ConversionConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PhysioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the scan and decimation parameters.
    pub fn validate(&self) -> Result<()> {
        let tr = self.repetition_period_s;
        if !(tr.is_finite() && tr > 0.0) {
            return Err(PhysioError::InvalidParameter(format!(
                "repetition period must be > 0 s, got {tr}"
            )));
        }
        let tr_ms = tr * 1000.0;
        if (tr_ms - tr_ms.round()).abs() > 1e-6 {
            return Err(PhysioError::InvalidParameter(format!(
                "repetition period {tr} s is not a whole number of milliseconds"
            )));
        }
        if self.number_of_volumes == 0 {
            return Err(PhysioError::InvalidParameter(
                "number of volumes must be >= 1".into(),
            ));
        }
        let d = &self.decimation;
        if d.factor == 0 {
            return Err(PhysioError::InvalidParameter("decimation factor must be >= 1".into()));
        }
        if d.order == 0 || d.order % 2 != 0 {
            return Err(PhysioError::InvalidParameter(format!(
                "decimation filter order must be even and > 0, got {}",
                d.order
            )));
        }
        if !(d.cutoff > 0.0 && d.cutoff <= 1.0) {
            return Err(PhysioError::InvalidParameter(format!(
                "decimation cutoff must be in (0, 1], got {}",
                d.cutoff
            )));
        }
        Ok(())
    }

    /// Repetition period in whole milliseconds.
    pub fn repetition_period_ms(&self) -> i64 {
        (self.repetition_period_s * 1000.0).round() as i64
    }

    /// Rows in the emitted table: `TR·(volumes+1)·1000 / 20 + 1`.
    pub fn output_rows(&self) -> usize {
        let span = self.repetition_period_ms() * (self.number_of_volumes as i64 + 1);
        (span / GRID_STEP_MS) as usize + 1
    }

    /// Trigger pulse width in samples: `round(0.1 · TR_ms / 20)`.
    pub fn trigger_width_samples(&self) -> usize {
        (self.repetition_period_ms() as f64 / (10 * GRID_STEP_MS) as f64).round() as usize
    }
}
