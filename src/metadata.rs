//! Scan metadata (BIDS sidecar JSON) → acquisition time on the 20 ms grid.
use chrono::{NaiveTime, Timelike};
use serde_json::Value;

use crate::config::GRID_STEP_MS;
use crate::error::{PhysioError, Result};

/// Sidecar key holding the wall-clock start of the first volume.
pub const ACQUISITION_TIME_FIELD: &str = "AcquisitionTime";

/// Acquisition time of the run in ms since midnight, rounded to the grid.
pub fn acquisition_time_ms(metadata: &Value) -> Result<i64> {
    let field = metadata
        .get(ACQUISITION_TIME_FIELD)
        .ok_or(PhysioError::MissingAcquisitionTime)?;
    let text = field
        .as_str()
        .ok_or_else(|| PhysioError::InvalidAcquisitionTime(field.to_string()))?;
    let ms = parse_clock_time_ms(text)?;
    Ok(round_ms_to_step(ms, GRID_STEP_MS))
}

/// `HH:MM:SS[.ffffff]` → `(H·3600 + M·60 + S) · 1000`, unrounded.
pub fn parse_clock_time_ms(text: &str) -> Result<f64> {
    let t = NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f")
        .map_err(|_| PhysioError::InvalidAcquisitionTime(text.to_string()))?;
    Ok(t.num_seconds_from_midnight() as f64 * 1000.0 + t.nanosecond() as f64 / 1e6)
}

/// Round fractional milliseconds to a multiple of `step`, ties to even.
pub fn round_ms_to_step(ms: f64, step: i64) -> i64 {
    (ms / step as f64).round_ties_even() as i64 * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fractional_seconds() {
        let ms = parse_clock_time_ms("13:03:49.742500").unwrap();
        approx::assert_abs_diff_eq!(ms, 47029742.5, epsilon = 1e-6);
    }

    #[test]
    fn parses_whole_seconds() {
        approx::assert_abs_diff_eq!(parse_clock_time_ms("00:00:02").unwrap(), 2000.0);
    }

    #[test]
    fn acquisition_time_is_rounded_to_grid() {
        let meta = json!({ "AcquisitionTime": "13:03:49.742500", "RepetitionTime": 2.0 });
        assert_eq!(acquisition_time_ms(&meta).unwrap(), 47029740);
    }

    #[test]
    fn tie_rounds_to_even_multiple() {
        // 10 ms is exactly half a step: 0 is the even multiple.
        let meta = json!({ "AcquisitionTime": "00:00:00.010" });
        assert_eq!(acquisition_time_ms(&meta).unwrap(), 0);
        let meta = json!({ "AcquisitionTime": "00:00:00.030" });
        assert_eq!(acquisition_time_ms(&meta).unwrap(), 40);
    }

    #[test]
    fn missing_field() {
        let meta = json!({ "RepetitionTime": 2.0 });
        assert!(matches!(
            acquisition_time_ms(&meta),
            Err(PhysioError::MissingAcquisitionTime)
        ));
    }

    #[test]
    fn malformed_field() {
        for bad in [json!({ "AcquisitionTime": "noon" }), json!({ "AcquisitionTime": 12 })] {
            assert!(matches!(
                acquisition_time_ms(&bad),
                Err(PhysioError::InvalidAcquisitionTime(_))
            ));
        }
    }
}
