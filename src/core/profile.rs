/// Rolling mean and standard deviation for all windows of length `m`.
///
/// Computed in one pass over cumulative sums and sums-of-squares. The
/// precomputed `1 / (sqrt(m) * sigma)` lets the distance conversion replace
/// division with multiplication in the inner loop.
#[derive(Debug, Clone)]
pub struct RollingStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    /// `1 / (sqrt(m) * sigma)` per window; zero for constant windows.
    pub m_sigma_inv: Vec<f64>,
}

impl RollingStats {
    pub fn compute(ts: &[f64], m: usize) -> Self {
        assert!(m > 0, "Window length must be > 0");
        assert!(ts.len() >= m, "Series must be at least as long as m");

        let n = ts.len();
        let n_subs = n - m + 1;

        let mut cumsum = vec![0.0; n + 1];
        let mut cumsum_sq = vec![0.0; n + 1];
        for i in 0..n {
            cumsum[i + 1] = cumsum[i] + ts[i];
            cumsum_sq[i + 1] = cumsum_sq[i] + ts[i] * ts[i];
        }

        let m_f = m as f64;
        let sqrt_m = m_f.sqrt();
        let mut mean = vec![0.0; n_subs];
        let mut std = vec![0.0; n_subs];
        let mut m_sigma_inv = vec![0.0; n_subs];

        for i in 0..n_subs {
            let sum = cumsum[i + m] - cumsum[i];
            let sum_sq = cumsum_sq[i + m] - cumsum_sq[i];
            let mu = sum / m_f;
            // E[X^2] - E[X]^2, clamped against rounding
            let var = (sum_sq / m_f - mu * mu).max(0.0);
            let sigma = var.sqrt();
            mean[i] = mu;
            std[i] = sigma;
            m_sigma_inv[i] = if sigma < 1e-15 { 0.0 } else { 1.0 / (sqrt_m * sigma) };
        }

        Self {
            mean,
            std,
            m_sigma_inv,
        }
    }
}

/// Replace non-finite values with zero so dot-product machinery stays finite.
///
/// Missing positions are handled one level up: either through the window
/// validity mask (consensus search) or by the missing-data filter of the
/// query pipeline. The zero fill is never interpreted as a measurement.
pub fn sanitize(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

/// Per-window flag: `true` when the window `[i, i + m)` is fully finite.
///
/// Uses a prefix count of non-finite positions so the scan stays O(n).
pub fn valid_windows(values: &[f64], m: usize) -> Vec<bool> {
    assert!(m > 0 && values.len() >= m);
    let n = values.len();
    let mut bad_prefix = vec![0usize; n + 1];
    for i in 0..n {
        bad_prefix[i + 1] = bad_prefix[i] + usize::from(!values[i].is_finite());
    }
    (0..n - m + 1)
        .map(|i| bad_prefix[i + m] == bad_prefix[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_stats_simple() {
        // Windows of [1,2,3,4,5] at m=3: means 2,3,4; stds sqrt(2/3)
        let ts = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = RollingStats::compute(&ts, 3);

        assert_eq!(stats.mean.len(), 3);
        assert!((stats.mean[0] - 2.0).abs() < 1e-10);
        assert!((stats.mean[1] - 3.0).abs() < 1e-10);
        assert!((stats.mean[2] - 4.0).abs() < 1e-10);

        let expected_std = (2.0_f64 / 3.0).sqrt();
        for s in &stats.std {
            assert!((s - expected_std).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rolling_stats_constant_window() {
        let ts = vec![5.0; 8];
        let stats = RollingStats::compute(&ts, 4);
        for s in &stats.std {
            assert!(*s < 1e-12);
        }
        for inv in &stats.m_sigma_inv {
            assert_eq!(*inv, 0.0);
        }
    }

    #[test]
    fn test_sanitize_zero_fills_nan() {
        let values = vec![1.0, f64::NAN, -2.0, f64::INFINITY];
        assert_eq!(sanitize(&values), vec![1.0, 0.0, -2.0, 0.0]);
    }

    #[test]
    fn test_valid_windows_flags_nan_spans() {
        let values = vec![1.0, 2.0, f64::NAN, 3.0, 4.0, 5.0];
        let valid = valid_windows(&values, 2);
        assert_eq!(valid, vec![true, false, false, true, true]);
    }

    #[test]
    fn test_valid_windows_all_finite() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert!(valid_windows(&values, 3).iter().all(|&v| v));
    }
}
