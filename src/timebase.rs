//! Absolute time base and decimation to the 20 ms grid.
//!
//! The logger samples at `20 ms / factor` (2.5 ms at the default factor 8)
//! and stamps only the start and stop of the recording. The axis is rebuilt
//! from those two stamps, rounded to the grid:
//!
//! ```text
//! start, stop  ──round_to_step(20)──▶  axis = start, start+20, …, stop
//! samples      ──lowpass ▸ keep every 8th──▶  one value per axis entry
//! ```
use tracing::{debug, warn};

use crate::config::{ChannelKind, ConversionConfig, DecimationConfig, GRID_STEP_MS};
use crate::error::{PhysioError, Result};
use crate::filter::{design_decimation_lowpass, filter_zero_phase};
use crate::siemens::CleanTrace;

/// A channel on the absolute 20 ms grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelTrace {
    pub channel: ChannelKind,
    /// Absolute timestamps (ms since midnight), strictly increasing.
    pub axis: Vec<i64>,
    /// Decimated samples, `values.len() == axis.len()`.
    pub values: Vec<f64>,
    /// Device sampling period before decimation.
    pub raw_step_ms: f64,
    /// Axis step after decimation.
    pub step_ms: i64,
}

impl ChannelTrace {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First and last timestamp on the axis.
    pub fn span(&self) -> Option<(i64, i64)> {
        Some((*self.axis.first()?, *self.axis.last()?))
    }
}

/// Round `t` to the nearest multiple of `step`, ties to the even multiple.
///
/// `round_to_step(30, 20) == 40`, `round_to_step(10, 20) == 0`.
pub fn round_to_step(t: i64, step: i64) -> i64 {
    let q = t.div_euclid(step);
    let r = t.rem_euclid(step);
    let q = match (2 * r).cmp(&step) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => q + q.rem_euclid(2),
    };
    q * step
}

/// Every `step` from `start` to `stop`, both inclusive when on the grid.
pub fn time_axis(start: i64, stop: i64, step: i64) -> Vec<i64> {
    if stop < start {
        return vec![];
    }
    (start..=stop).step_by(step as usize).collect()
}

/// Anti-alias filter then keep every `cfg.factor`-th sample from index 0.
///
/// Output length is `ceil(n / factor)`.
pub fn decimate(x: &[f64], cfg: &DecimationConfig) -> Vec<f64> {
    if cfg.factor <= 1 {
        return x.to_vec();
    }
    let h = design_decimation_lowpass(cfg);
    filter_zero_phase(x, &h)
        .into_iter()
        .step_by(cfg.factor)
        .collect()
}

/// Build the absolute axis for a cleaned channel and decimate its samples.
///
/// The decimated trace and the header-derived axis must agree in length;
/// differences up to `cfg.length_tolerance` samples are resolved by
/// truncating both to the shorter one.
pub fn build_channel(clean: &CleanTrace, cfg: &ConversionConfig) -> Result<ChannelTrace> {
    let channel = clean.channel;
    let start = round_to_step(clean.start_ms, GRID_STEP_MS);
    let stop = round_to_step(clean.stop_ms, GRID_STEP_MS);
    let mut axis = time_axis(start, stop, GRID_STEP_MS);

    let samples: Vec<f64> = clean.samples.iter().map(|&v| v as f64).collect();
    let mut values = decimate(&samples, &cfg.decimation);

    if values.len() != axis.len() {
        let diff = values.len().abs_diff(axis.len());
        if diff > cfg.length_tolerance {
            return Err(PhysioError::ChannelLengthMismatch {
                channel,
                trace_len: values.len(),
                axis_len: axis.len(),
            });
        }
        warn!(
            %channel,
            trace = values.len(),
            axis = axis.len(),
            "trace and time axis differ by {diff} samples; truncating to the shorter"
        );
        let n = values.len().min(axis.len());
        values.truncate(n);
        axis.truncate(n);
    }

    debug!(%channel, start, stop, samples = values.len(), "time base built");
    Ok(ChannelTrace {
        channel,
        axis,
        values,
        raw_step_ms: GRID_STEP_MS as f64 / cfg.decimation.factor as f64,
        step_ms: GRID_STEP_MS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(start_ms: i64, stop_ms: i64, samples: Vec<i64>) -> CleanTrace {
        CleanTrace {
            channel: ChannelKind::Pulse,
            start_ms,
            stop_ms,
            samples,
            annotation_runs: 0,
        }
    }

    #[test]
    fn rounding_ties_go_to_even_multiple() {
        assert_eq!(round_to_step(10, 20), 0);
        assert_eq!(round_to_step(30, 20), 40);
        assert_eq!(round_to_step(50, 20), 40);
        assert_eq!(round_to_step(47029710, 20), 47029720);
        assert_eq!(round_to_step(47029729, 20), 47029720);
        assert_eq!(round_to_step(47029731, 20), 47029740);
    }

    #[test]
    fn rounding_negative_values() {
        assert_eq!(round_to_step(-10, 20), 0);
        assert_eq!(round_to_step(-11, 20), -20);
    }

    #[test]
    fn axis_is_inclusive_with_constant_step() {
        let a = time_axis(0, 100, 20);
        assert_eq!(a, vec![0, 20, 40, 60, 80, 100]);
        assert!(a.windows(2).all(|w| w[1] - w[0] == 20));
        assert!(time_axis(20, 0, 20).is_empty());
    }

    #[test]
    fn decimated_length_is_ceil() {
        let cfg = DecimationConfig::default();
        assert_eq!(decimate(&vec![0.0; 800], &cfg).len(), 100);
        assert_eq!(decimate(&vec![0.0; 801], &cfg).len(), 101);
    }

    #[test]
    fn constant_survives_decimation() {
        let y = decimate(&vec![2048.0; 4000], &DecimationConfig::default());
        for v in y {
            approx::assert_abs_diff_eq!(v, 2048.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn build_channel_axis_matches_trace() {
        // 0..=1000 ms → 51 grid points → 51 × 8 device samples.
        let c = clean(3, 1009, vec![100; 51 * 8]);
        let cfg = ConversionConfig::default();
        let t = build_channel(&c, &cfg).unwrap();
        assert_eq!(t.axis.len(), 51);
        assert_eq!(t.len(), 51);
        assert_eq!(t.span(), Some((0, 1000)));
        assert_eq!(t.raw_step_ms, 2.5);
    }

    #[test]
    fn length_mismatch_is_fatal_by_default() {
        let c = clean(0, 1000, vec![100; 49 * 8]);
        let err = build_channel(&c, &ConversionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            PhysioError::ChannelLengthMismatch { trace_len: 49, axis_len: 51, .. }
        ));
    }

    #[test]
    fn length_tolerance_truncates() {
        let c = clean(0, 1000, vec![100; 53 * 8]);
        let cfg = ConversionConfig { length_tolerance: 2, ..ConversionConfig::default() };
        let t = build_channel(&c, &cfg).unwrap();
        assert_eq!(t.len(), 51);
        assert_eq!(t.axis.len(), 51);
    }
}
