//! Overlap-add zero-phase FIR convolution.
//!
//! Zero-phase is obtained by shifting the linear-phase output left by
//! `(N-1)/2` samples, not by running the filter twice. Edge transients are
//! suppressed with `N-1` samples of odd (reflect-limited) padding on each
//! side, so constant and linear segments pass through unchanged.
use rustfft::{num_complex::Complex, FftPlanner};

/// Filter `x` with the odd-length linear-phase kernel `h`, zero-phase.
///
/// Returns a vector of the same length as `x`.
pub fn filter_zero_phase(x: &[f64], h: &[f64]) -> Vec<f64> {
    let n_x = x.len();
    let n_h = h.len();
    if n_x == 0 {
        return vec![];
    }
    debug_assert!(n_h % 2 == 1, "zero-phase shift needs an odd kernel");

    let shift = (n_h - 1) / 2;
    let n_edge = n_h - 1;
    let x_ext = reflect_limited_pad(x, n_edge, n_edge);
    let n_ext = x_ext.len();

    let n_fft = choose_fft_len(n_h, n_ext);
    let n_seg = n_fft - n_h + 1;

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft_fwd = planner.plan_fft_forward(n_fft);
    let fft_inv = planner.plan_fft_inverse(n_fft);
    let inv_scale = 1.0 / n_fft as f64;

    let mut h_fft = zero_padded(h, n_fft);
    fft_fwd.process(&mut h_fft);

    let mut y = vec![0.0_f64; n_ext];
    for start in (0..n_ext).step_by(n_seg) {
        let stop = (start + n_seg).min(n_ext);
        let mut buf = zero_padded(&x_ext[start..stop], n_fft);
        fft_fwd.process(&mut buf);
        for (b, &hf) in buf.iter_mut().zip(&h_fft) {
            *b *= hf;
        }
        fft_inv.process(&mut buf);

        // Sample p of this block's linear convolution lands at start + p - shift.
        let out_start = start.saturating_sub(shift);
        let skip = shift.saturating_sub(start);
        for (o, b) in (out_start..n_ext).zip(buf.iter().skip(skip)) {
            y[o] += b.re * inv_scale;
        }
    }

    y[n_edge..n_edge + n_x].to_vec()
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn zero_padded(x: &[f64], n: usize) -> Vec<Complex<f64>> {
    x.iter()
        .map(|&v| Complex { re: v, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n)
        .collect()
}

/// Odd reflection about the end samples; zeros beyond what `x` can supply.
///
/// Left:  `pad[i] = 2*x[0] - x[i]`, right: `pad[i] = 2*x[-1] - x[-(i+1)]`.
fn reflect_limited_pad(x: &[f64], n_l: usize, n_r: usize) -> Vec<f64> {
    let n = x.len();
    let actual_l = n_l.min(n - 1);
    let actual_r = n_r.min(n - 1);
    let first = x[0];
    let last = x[n - 1];

    let mut out = Vec::with_capacity(n_l + n + n_r);
    out.extend(std::iter::repeat(0.0).take(n_l - actual_l));
    out.extend((1..=actual_l).rev().map(|i| 2.0 * first - x[i]));
    out.extend_from_slice(x);
    out.extend((1..=actual_r).map(|i| 2.0 * last - x[n - 1 - i]));
    out.extend(std::iter::repeat(0.0).take(n_r - actual_r));
    out
}

/// Power-of-two block size minimising
/// `ceil(n_x / (N - n_h + 1)) · N · (log2 N + 1) + 4e-5 · N · n_x`.
fn choose_fft_len(n_h: usize, n_x: usize) -> usize {
    let min_fft = 2 * n_h - 1;
    let min_pow = (min_fft as f64).log2().ceil() as u32;
    let max_pow = ((n_x as f64).log2().ceil() as u32 + 1).max(min_pow);

    (min_pow..=max_pow)
        .map(|pow| {
            let n = 1_usize << pow;
            let n_seg = (n - n_h + 1) as f64;
            let cost = (n_x as f64 / n_seg).ceil() * n as f64 * (pow as f64 + 1.0)
                + 4e-5 * n as f64 * n_x as f64;
            (n, cost)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(n, _)| n)
        .unwrap_or(1 << max_pow)
}
