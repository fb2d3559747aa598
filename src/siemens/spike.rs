//! Peak-detection spike repair.
//!
//! When the scanner's pulse detector fires, the logger writes
//! [`SATURATION_VALUE`] in place of the sample. Interior spikes become the
//! floor-average of their neighbours in the *unrepaired* trace; a spike at
//! either end has only one neighbour and is left as-is.
use super::constants::SATURATION_VALUE;

/// Replace every interior saturated sample with `floor((left + right) / 2)`.
///
/// Neighbours are read from `samples`, never from already repaired values,
/// so runs of adjacent spikes do not drift.
pub fn repair_spikes(samples: &[i64]) -> Vec<i64> {
    let n = samples.len();
    let mut out = samples.to_vec();
    for i in 1..n.saturating_sub(1) {
        if samples[i] == SATURATION_VALUE {
            out[i] = (samples[i - 1] + samples[i + 1]).div_euclid(2);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i64 = SATURATION_VALUE;

    #[test]
    fn interior_spike_is_floor_average() {
        assert_eq!(repair_spikes(&[10, S, 13]), vec![10, 11, 13]);
    }

    #[test]
    fn adjacent_spikes_use_original_neighbours() {
        // i=1: (10 + S) / 2, i=2: (S + 20) / 2, both from the raw trace.
        let out = repair_spikes(&[10, S, S, 20]);
        assert_eq!(out, vec![10, (10 + S) / 2, (S + 20) / 2, 20]);
    }

    #[test]
    fn edge_spikes_are_left_alone() {
        assert_eq!(repair_spikes(&[S, 1, 2, S]), vec![S, 1, 2, S]);
        assert_eq!(repair_spikes(&[S]), vec![S]);
        assert!(repair_spikes(&[]).is_empty());
    }

    #[test]
    fn negative_sum_floors_downward() {
        assert_eq!(repair_spikes(&[-3, S, 0]), vec![-3, -2, 0]);
    }
}
