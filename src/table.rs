//! Output assembly: relative time, respiration, trigger, pulse.
use ndarray::Array2;

use crate::align::AcquisitionWindow;
use crate::config::{ChannelKind, GRID_STEP_MS};
use crate::error::{PhysioError, Result};

/// Column order of the emitted file.
pub const COLUMNS: [&str; 4] = ["time", "resp", "trigger", "pulse"];

/// Equal-length output columns, one row per 20 ms sample of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    /// Seconds relative to the first volume (0 s = acquisition time).
    pub time_s: Vec<f64>,
    pub respiration: Vec<f64>,
    pub trigger: Vec<f64>,
    pub pulse: Vec<f64>,
}

/// `−TR, −TR + 0.02, …, N·TR` in seconds.
///
/// Generated from integer sample indices so the spacing is exact regardless
/// of any rounding in the absolute axes.
pub fn relative_time_axis(window: &AcquisitionWindow) -> Vec<f64> {
    let n = (window.duration_ms() / GRID_STEP_MS) as usize + 1;
    (0..n as i64)
        .map(|i| (i * GRID_STEP_MS - window.repetition_ms) as f64 / 1000.0)
        .collect()
}

impl AlignedTable {
    /// Merge the aligned channels under a regenerated relative time axis.
    pub fn assemble(
        window: &AcquisitionWindow,
        respiration: Vec<f64>,
        trigger: Vec<f64>,
        pulse: Vec<f64>,
    ) -> Result<Self> {
        let time_s = relative_time_axis(window);
        for (channel, col) in [(ChannelKind::Respiration, &respiration), (ChannelKind::Pulse, &pulse)] {
            if col.len() != time_s.len() {
                return Err(PhysioError::ChannelLengthMismatch {
                    channel,
                    trace_len: col.len(),
                    axis_len: time_s.len(),
                });
            }
        }
        if trigger.len() != time_s.len() {
            return Err(PhysioError::InvalidParameter(format!(
                "trigger column has {} rows, time axis has {}",
                trigger.len(),
                time_s.len()
            )));
        }
        Ok(Self { time_s, respiration, trigger, pulse })
    }

    pub fn n_rows(&self) -> usize {
        self.time_s.len()
    }

    /// Rows × [`COLUMNS`] matrix.
    pub fn to_array(&self) -> Array2<f64> {
        let cols = [&self.time_s, &self.respiration, &self.trigger, &self.pulse];
        Array2::from_shape_fn((self.n_rows(), cols.len()), |(r, c)| cols[c][r])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;

    fn window() -> AcquisitionWindow {
        let cfg = ConversionConfig {
            repetition_period_s: 2.0,
            number_of_volumes: 5,
            ..ConversionConfig::default()
        };
        AcquisitionWindow::new(1_000_000, &cfg).unwrap()
    }

    #[test]
    fn relative_axis_endpoints_and_step() {
        let t = relative_time_axis(&window());
        assert_eq!(t.len(), 601);
        assert_eq!(t[0], -2.0);
        assert_eq!(t[100], 0.0);
        assert_eq!(*t.last().unwrap(), 10.0);
        approx::assert_abs_diff_eq!(t[1] - t[0], 0.02, epsilon = 1e-12);
    }

    #[test]
    fn assemble_checks_lengths() {
        let w = window();
        let err = AlignedTable::assemble(&w, vec![0.0; 600], vec![0.0; 601], vec![0.0; 601]).unwrap_err();
        assert!(matches!(
            err,
            PhysioError::ChannelLengthMismatch { channel: ChannelKind::Respiration, trace_len: 600, axis_len: 601 }
        ));
    }

    #[test]
    fn array_has_column_order() {
        let w = window();
        let table = AlignedTable::assemble(&w, vec![1.0; 601], vec![0.0; 601], vec![3.0; 601]).unwrap();
        let a = table.to_array();
        assert_eq!(a.dim(), (601, 4));
        assert_eq!(a[[0, 0]], -2.0);
        assert_eq!(a[[0, 1]], 1.0);
        assert_eq!(a[[0, 3]], 3.0);
    }
}
