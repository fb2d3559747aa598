//! Anti-aliasing FIR design matching `scipy.signal.firwin`.
//!
//! For decimation by `q` with order `N` and cutoff fraction `c`:
//!   • taps        = N + 1 (odd, linear phase, centre tap at N/2)
//!   • cutoff      = c / q of the input Nyquist
//!   • window      = Hamming
//!   • normalised to unit DC gain
use std::f64::consts::PI;

use crate::config::DecimationConfig;

/// Design the lowpass applied before keeping every `cfg.factor`-th sample.
///
/// With the defaults (`q = 8`, `N = 160`, `c = 1.0`) this is
/// `scipy.signal.firwin(161, 1/8, window='hamming')`, the kernel used by
/// `scipy.signal.decimate(x, 8, ftype='fir')`.
pub fn design_decimation_lowpass(cfg: &DecimationConfig) -> Vec<f64> {
    firwin(cfg.n_taps(), cfg.cutoff / cfg.factor as f64)
}

/// Windowed-sinc lowpass with `n` taps and cutoff `fc` in units of Nyquist.
///
/// `fc` is the −6 dB point, `0 < fc ≤ 1`.
pub fn firwin(n: usize, fc: f64) -> Vec<f64> {
    assert!(n % 2 == 1, "firwin requires odd N for linear-phase filter");
    let alpha = (n - 1) as f64 / 2.0;
    let win = hamming(n);

    let mut h: Vec<f64> = (0..n)
        .map(|i| {
            let x = i as f64 - alpha;
            // sin(π·fc·x) / (π·x) → fc as x → 0
            let sinc = if x == 0.0 { fc } else { (PI * fc * x).sin() / (PI * x) };
            sinc * win[i]
        })
        .collect();

    let s: f64 = h.iter().sum();
    h.iter_mut().for_each(|v| *v /= s);
    h
}

/// Hamming window of length `n`.
pub fn hamming(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Magnitude response `|H(f)|` at `f` in units of Nyquist.
pub fn gain_at(h: &[f64], f: f64) -> f64 {
    let (re, im) = h.iter().enumerate().fold((0.0, 0.0), |(re, im), (k, &v)| {
        let w = PI * f * k as f64;
        (re + v * w.cos(), im - v * w.sin())
    });
    (re * re + im * im).sqrt()
}
