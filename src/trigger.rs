//! Synthetic scanner trigger channel.
//!
//! A block of ones `width` samples long starts at every volume onset. Onsets
//! are looked up on the window axis by equality; one that is not on the axis
//! gets no pulse (unlike the window endpoints, which are mandatory).
use tracing::debug;

use crate::align::AcquisitionWindow;

/// Volume onsets: `acquisition + k·TR` for `k in 0..N`.
pub fn trigger_onsets(window: &AcquisitionWindow) -> Vec<i64> {
    (0..window.volumes as i64)
        .map(|k| window.acquisition_ms + k * window.repetition_ms)
        .collect()
}

/// 0/1 trigger column over `axis` with a `width`-sample pulse at each onset.
///
/// Pulses running past the end of `axis` are clipped.
pub fn synthesize_trigger(axis: &[i64], onsets: &[i64], width: usize) -> Vec<f64> {
    let mut trigger = vec![0.0; axis.len()];
    for &t in onsets {
        match axis.binary_search(&t) {
            Ok(i) => {
                let end = (i + width).min(axis.len());
                trigger[i..end].fill(1.0);
            }
            Err(_) => debug!(onset_ms = t, "volume onset not on the output axis, skipped"),
        }
    }
    trigger
}

/// Rising edges of a 0/1 column, as sample indices.
pub fn pulse_starts(trigger: &[f64]) -> Vec<usize> {
    (0..trigger.len())
        .filter(|&i| trigger[i] > 0.5 && (i == 0 || trigger[i - 1] <= 0.5))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use crate::timebase::time_axis;

    fn window(tr: f64, n: usize) -> (AcquisitionWindow, ConversionConfig) {
        let cfg = ConversionConfig {
            repetition_period_s: tr,
            number_of_volumes: n,
            ..ConversionConfig::default()
        };
        (AcquisitionWindow::new(60_000, &cfg).unwrap(), cfg)
    }

    #[test]
    fn one_pulse_per_volume() {
        let (w, cfg) = window(2.0, 5);
        let trig = synthesize_trigger(&w.axis(), &trigger_onsets(&w), cfg.trigger_width_samples());
        let starts = pulse_starts(&trig);
        assert_eq!(starts, vec![100, 200, 300, 400, 500]);
        assert_eq!(trig.iter().filter(|&&v| v == 1.0).count(), 5 * 10);
        assert_eq!(&trig[100..110], &[1.0; 10]);
        assert_eq!(trig[110], 0.0);
        assert_eq!(trig[99], 0.0);
    }

    #[test]
    fn single_volume() {
        let (w, cfg) = window(1.5, 1);
        let trig = synthesize_trigger(&w.axis(), &trigger_onsets(&w), cfg.trigger_width_samples());
        assert_eq!(trig.len(), 151);
        assert_eq!(pulse_starts(&trig), vec![75]);
    }

    #[test]
    fn off_axis_onset_is_skipped() {
        let axis = time_axis(0, 200, 20);
        let trig = synthesize_trigger(&axis, &[40, 50, 180], 3);
        assert_eq!(pulse_starts(&trig), vec![2, 9]);
        // Clipped at the end of the axis.
        assert_eq!(&trig[9..], &[1.0, 1.0]);
    }
}
