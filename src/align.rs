//! Acquisition window and per-channel segment extraction.
//!
//! ```text
//!            acquisition
//!   ├── TR ──┼── TR ──┼── TR ──┼ … ┼── TR ──┤
//! start     vol 1    vol 2              vol N  end
//! ```
//! Both endpoints must be *exact* entries of every channel's absolute axis.
use tracing::debug;

use crate::config::{ConversionConfig, GRID_STEP_MS};
use crate::error::{PhysioError, Result};
use crate::timebase::{time_axis, ChannelTrace};

/// Absolute span `[acquisition − TR, acquisition + N·TR]` in ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionWindow {
    pub acquisition_ms: i64,
    pub repetition_ms: i64,
    pub volumes: usize,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl AcquisitionWindow {
    pub fn new(acquisition_ms: i64, cfg: &ConversionConfig) -> Result<Self> {
        cfg.validate()?;
        let repetition_ms = cfg.repetition_period_ms();
        let volumes = cfg.number_of_volumes;
        let start_ms = acquisition_ms - repetition_ms;
        let end_ms = acquisition_ms + repetition_ms * volumes as i64;
        debug_assert!(start_ms < end_ms);
        Ok(Self { acquisition_ms, repetition_ms, volumes, start_ms, end_ms })
    }

    /// `end − start`, always `TR · (1 + N)`.
    pub fn duration_ms(&self) -> i64 {
        self.end_ms - self.start_ms
    }

    /// Absolute 20 ms grid covering the window, endpoints included.
    pub fn axis(&self) -> Vec<i64> {
        time_axis(self.start_ms, self.end_ms, GRID_STEP_MS)
    }
}

/// Inclusive slice of `trace` between the window endpoints.
///
/// Endpoints are matched by equality; a missing endpoint is
/// [`PhysioError::TimestampOutOfRange`].
pub fn extract_segment(trace: &ChannelTrace, window: &AcquisitionWindow) -> Result<Vec<f64>> {
    if trace.values.len() != trace.axis.len() {
        return Err(PhysioError::ChannelLengthMismatch {
            channel: trace.channel,
            trace_len: trace.values.len(),
            axis_len: trace.axis.len(),
        });
    }
    let lookup = |t: i64| {
        trace.axis.binary_search(&t).map_err(|_| {
            let (axis_start_ms, axis_stop_ms) = trace.span().unwrap_or((0, 0));
            PhysioError::TimestampOutOfRange {
                channel: trace.channel,
                timestamp_ms: t,
                axis_start_ms,
                axis_stop_ms,
            }
        })
    };
    let i0 = lookup(window.start_ms)?;
    let i1 = lookup(window.end_ms)?;
    debug!(channel = %trace.channel, i0, i1, "window located");
    Ok(trace.values[i0..=i1].to_vec())
}
