use realfft::RealFftPlanner;

/// Work threshold (`n * m`) above which the FFT path pays off.
/// Below it the naive loop wins on constant overhead.
const FFT_THRESHOLD: usize = 256 * 1024;

/// Sliding dot product between a window `q` and a series `ts`.
///
/// Element `i` of the result is `dot(q, ts[i..i+m])`. Dispatches to an
/// FFT-based O(n log n) implementation for large inputs and to the naive
/// O(n*m) loop otherwise; both agree within floating tolerance.
pub fn sliding_dot_product(q: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = q.len();
    let n = ts.len();
    assert!(n >= m, "Series shorter than window");
    if n * m > FFT_THRESHOLD {
        sliding_dot_product_fft(q, ts)
    } else {
        sliding_dot_product_naive(q, ts)
    }
}

pub fn sliding_dot_product_naive(q: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = q.len();
    assert!(ts.len() >= m, "Series shorter than window");
    (0..ts.len() - m + 1)
        .map(|i| q.iter().zip(&ts[i..i + m]).map(|(a, b)| a * b).sum())
        .collect()
}

/// FFT sliding dot product via cross-correlation: convolve the reversed
/// window with the series and read the dot products out of the overlap.
pub fn sliding_dot_product_fft(q: &[f64], ts: &[f64]) -> Vec<f64> {
    let m = q.len();
    let n = ts.len();
    assert!(n >= m, "Series shorter than window");
    let n_subs = n - m + 1;
    let fft_len = (n + m - 1).next_power_of_two();

    let mut planner = RealFftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(fft_len);
    let inverse = planner.plan_fft_inverse(fft_len);

    let mut q_padded = vec![0.0; fft_len];
    for (i, &v) in q.iter().enumerate() {
        q_padded[m - 1 - i] = v;
    }
    let mut ts_padded = vec![0.0; fft_len];
    ts_padded[..n].copy_from_slice(ts);

    let mut q_spectrum = forward.make_output_vec();
    let mut ts_spectrum = forward.make_output_vec();
    forward.process(&mut q_padded, &mut q_spectrum).unwrap();
    forward.process(&mut ts_padded, &mut ts_spectrum).unwrap();

    for (qv, tv) in q_spectrum.iter_mut().zip(ts_spectrum.iter()) {
        *qv *= tv;
    }

    let mut conv = vec![0.0; fft_len];
    inverse.process(&mut q_spectrum, &mut conv).unwrap();

    // realfft's inverse is unnormalized
    let norm = 1.0 / fft_len as f64;
    conv[m - 1..m - 1 + n_subs].iter().map(|&x| x * norm).collect()
}

/// Set entries of `profile` within `zone` of `idx` to infinity, so later
/// min-scans skip the neighborhood of an already-claimed match.
#[inline]
pub fn apply_exclusion_zone(profile: &mut [f64], idx: usize, zone: usize) {
    let start = idx.saturating_sub(zone);
    let end = (idx + zone + 1).min(profile.len());
    for val in &mut profile[start..end] {
        *val = f64::INFINITY;
    }
}
