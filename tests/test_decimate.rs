mod common;
use common::{channel_log, device_samples, sample_tokens};
use physlog::{build_channel, clean_channel, decimate, ChannelKind, ConversionConfig, DecimationConfig};
use std::f64::consts::PI;

const FS: f64 = 400.0; // device rate at the default factor

fn tone(freq: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| (2.0 * PI * freq * i as f64 / FS).sin()).collect()
}

/// RMS with `guard` samples dropped at both ends (edge transients).
fn rms(x: &[f64], guard: usize) -> f64 {
    let inner = &x[guard..x.len() - guard];
    (inner.iter().map(|v| v * v).sum::<f64>() / inner.len() as f64).sqrt()
}

#[test]
fn passband_tone_keeps_its_amplitude() {
    let y = decimate(&tone(5.0, 40 * 400), &DecimationConfig::default());
    let r = rms(&y, 50);
    assert!((r - 0.5_f64.sqrt()).abs() < 0.01, "5 Hz RMS = {r:.4}");
}

#[test]
fn tone_above_output_nyquist_is_not_aliased() {
    // 40 Hz at 400 Hz → 50 Hz output would alias to 10 Hz at full amplitude.
    let x = tone(40.0, 40 * 400);
    let naive: Vec<f64> = x.iter().copied().step_by(8).collect();
    assert!(rms(&naive, 50) > 0.6, "stride picking should alias");

    let y = decimate(&x, &DecimationConfig::default());
    let r = rms(&y, 50);
    assert!(r < 0.01, "40 Hz leaked through decimation: RMS = {r:.4}");
}

#[test]
fn decimation_is_reproducible() {
    let x = tone(7.3, 12_345);
    let cfg = DecimationConfig::default();
    assert_eq!(decimate(&x, &cfg), decimate(&x, &cfg));
}

#[test]
fn factor_one_is_identity() {
    let x = tone(3.0, 100);
    let cfg = DecimationConfig { factor: 1, ..DecimationConfig::default() };
    assert_eq!(decimate(&x, &cfg), x);
}

#[test]
fn channel_axis_step_and_length() {
    let (start, stop) = (47_029_713, 47_089_705);
    // Rounded: 47_029_720 … 47_089_700.
    let n = device_samples(47_029_720, 47_089_700);
    let text = channel_log(ChannelKind::Pulse, &sample_tokens(&vec![2000; n]), start, stop);
    let clean = clean_channel(&text, ChannelKind::Pulse).unwrap();
    assert_eq!(clean.start_ms, start);

    let trace = build_channel(&clean, &ConversionConfig::default()).unwrap();
    assert_eq!(trace.step_ms, 20);
    assert_eq!(trace.raw_step_ms, 2.5);
    assert_eq!(trace.axis.len(), trace.values.len());
    assert_eq!(trace.span(), Some((47_029_720, 47_089_700)));
    assert!(trace.axis.windows(2).all(|w| w[1] - w[0] == 20));
}
